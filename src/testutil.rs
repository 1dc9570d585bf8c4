//! Scenario builder for integration tests: one in-memory host with online
//! players, command submission, ticking, and typed views over the store,
//! the outbox, and combat verdicts.

use std::collections::BTreeMap;
use std::sync::Arc;

use bevy_app::App;
use bevy_ecs::entity::Entity;
use bevy_ecs::message::Messages;

use crate::ecs::clock::TICKS_PER_SECOND;
use crate::ecs::commands::{ClanCommand, ClanCommandKind};
use crate::ecs::components::Membership;
use crate::ecs::events::{AttackAttempt, AttackVerdict};
use crate::ecs::resources::{AttackCooldowns, Delivery, Effects, Outbox, PlayerDirectory};
use crate::ecs::schedule::HostTick;
use crate::ecs::{ClanRegistry, EffectPort, build_clan_app_seeded, despawn_player, spawn_player};
use crate::model::{Clan, JoinRequest, TopClanEntry};
use crate::store::MemoryStore;

pub struct Scenario {
    pub app: App,
    pub store: Arc<MemoryStore>,
}

impl Scenario {
    pub fn new() -> Self {
        Self::with_seed(42)
    }

    pub fn with_seed(seed: u64) -> Self {
        let store = Arc::new(MemoryStore::new());
        let app = build_clan_app_seeded(store.clone(), seed);
        Self { app, store }
    }

    /// Install a custom effect port (for failure-path tests).
    pub fn with_effects(mut self, port: Arc<dyn EffectPort>) -> Self {
        self.app.insert_resource(Effects(port));
        self
    }

    // -- players ---------------------------------------------------------

    /// Bring a player online.
    pub fn join(&mut self, name: &str) -> Entity {
        spawn_player(self.app.world_mut(), name)
    }

    /// Take a player offline.
    pub fn part(&mut self, name: &str) {
        despawn_player(self.app.world_mut(), name);
    }

    pub fn entity(&self, name: &str) -> Entity {
        self.app
            .world()
            .resource::<PlayerDirectory>()
            .entity(name)
            .unwrap_or_else(|| panic!("player {name} is not online"))
    }

    pub fn membership(&self, name: &str) -> Membership {
        self.app
            .world()
            .get::<Membership>(self.entity(name))
            .cloned()
            .unwrap_or_default()
    }

    // -- driving the host ------------------------------------------------

    /// Queue a command without running a tick.
    pub fn command(&mut self, issuer: &str, kind: ClanCommandKind) {
        self.app
            .world_mut()
            .resource_mut::<Messages<ClanCommand>>()
            .write(ClanCommand::new(issuer, kind));
    }

    /// Queue a command and run one tick.
    pub fn run(&mut self, issuer: &str, kind: ClanCommandKind) {
        self.command(issuer, kind);
        self.tick();
    }

    /// Queue an attack attempt without running a tick.
    pub fn attack(&mut self, attacker: &str, victim: &str) {
        let attacker = self.entity(attacker);
        let victim = self.entity(victim);
        self.app
            .world_mut()
            .resource_mut::<Messages<AttackAttempt>>()
            .write(AttackAttempt { attacker, victim });
    }

    pub fn tick(&mut self) {
        self.app.world_mut().run_schedule(HostTick);
    }

    pub fn tick_seconds(&mut self, n: u64) {
        for _ in 0..n * TICKS_PER_SECOND {
            self.tick();
        }
    }

    /// Spawn the owner (if needed) and found a clan in one step.
    pub fn found_clan(&mut self, owner: &str, name: &str) {
        if self
            .app
            .world()
            .resource::<PlayerDirectory>()
            .entity(owner)
            .is_none()
        {
            self.join(owner);
        }
        self.run(
            owner,
            ClanCommandKind::Create {
                name: name.to_string(),
            },
        );
    }

    // -- typed views -----------------------------------------------------

    pub fn clans(&self) -> BTreeMap<String, Clan> {
        self.registry().clans()
    }

    pub fn clan(&self, name: &str) -> Clan {
        self.clans()
            .remove(name)
            .unwrap_or_else(|| panic!("clan {name} is not registered"))
    }

    pub fn requests(&self) -> BTreeMap<String, JoinRequest> {
        self.registry().join_requests()
    }

    pub fn protection(&self) -> BTreeMap<String, bool> {
        self.registry().protection()
    }

    pub fn top_clans(&self) -> Vec<TopClanEntry> {
        self.registry().top_clans()
    }

    fn registry(&self) -> ClanRegistry {
        self.app.world().resource::<ClanRegistry>().clone()
    }

    // -- deliveries ------------------------------------------------------

    /// Message texts queued for a player since the last drain.
    pub fn messages_for(&self, name: &str) -> Vec<String> {
        self.app
            .world()
            .resource::<Outbox>()
            .messages_for(name)
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    /// Take everything queued in the outbox.
    pub fn drain_outbox(&mut self) -> Vec<Delivery> {
        self.app.world_mut().resource_mut::<Outbox>().drain()
    }

    /// Take the verdicts emitted by the combat system. Call right after the
    /// tick that resolved the attempts; buffer rotation drops them on the
    /// tick after next.
    pub fn take_verdicts(&mut self) -> Vec<AttackVerdict> {
        self.app
            .world_mut()
            .resource_mut::<Messages<AttackVerdict>>()
            .drain()
            .collect()
    }

    pub fn cooldown_count(&self) -> usize {
        self.app.world().resource::<AttackCooldowns>().len()
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Self::new()
    }
}
