use std::collections::BTreeMap;

use bevy_ecs::message::Messages;
use bevy_ecs::world::World;

use crate::ecs::clock::HostClock;
use crate::ecs::components::Membership;
use crate::ecs::events::ClanEvent;
use crate::ecs::resources::{ClanRegistry, ClanRng, Outbox, PlayerDirectory, SoundCue};
use crate::error::ClanError;
use crate::model::{Clan, JoinRequest};

use super::{ClanCommand, ClanCommandKind};
use super::{apply_admin, apply_chat, apply_membership};

/// Context passed to all `apply_*` sub-functions: the three record sets
/// loaded from the registry, plus the resources they mutate. Dirty flags
/// decide which blobs get written back after the batch.
pub(crate) struct ApplyCtx {
    pub clans: BTreeMap<String, Clan>,
    pub requests: BTreeMap<String, JoinRequest>,
    pub protection: BTreeMap<String, bool>,
    pub clans_dirty: bool,
    pub requests_dirty: bool,
    pub protection_dirty: bool,
    pub outbox: Outbox,
    pub rng: ClanRng,
    pub directory: PlayerDirectory,
    pub now_ms: u64,
    pub events: Vec<ClanEvent>,
}

impl ApplyCtx {
    /// Surface a rejected operation to the issuer: message plus error cue.
    pub(crate) fn deny(&mut self, player: &str, err: &ClanError) {
        self.outbox.message(player, err.to_string());
        self.outbox.sound(player, SoundCue::Error);
    }

    /// Queue a reactive event for emission after the batch.
    pub(crate) fn emit(&mut self, event: ClanEvent) {
        self.events.push(event);
    }

    /// Deliver a clan-wide notification to every online member.
    pub(crate) fn notify_clan(&mut self, clan_name: &str, text: &str) {
        let Some(clan) = self.clans.get(clan_name) else {
            return;
        };
        let members = clan.members.clone();
        for member in &members {
            if self.directory.is_online(member) {
                self.outbox.message(member, format!("[CLAN] {text}"));
                self.outbox.sound(member, SoundCue::Chime);
            }
        }
    }

    /// Mutate an online player's membership component. No-op for offline
    /// players; their state is rebuilt from the records on next spawn.
    pub(crate) fn update_membership(
        &mut self,
        world: &mut World,
        player: &str,
        f: impl FnOnce(&mut Membership),
    ) {
        if let Some(entity) = self.directory.entity(player) {
            if let Some(mut membership) = world.get_mut::<Membership>(entity) {
                f(&mut membership);
            }
        }
    }
}

/// An online player's relational state. Membership checks go through the
/// component, not through stored-list scans: a departed owner may linger
/// in a stored member list without being considered a member.
pub(crate) fn membership_of(
    world: &World,
    directory: &PlayerDirectory,
    player: &str,
) -> Membership {
    directory
        .entity(player)
        .and_then(|entity| world.get::<Membership>(entity))
        .cloned()
        .unwrap_or_default()
}

/// Exclusive system that drains all pending `ClanCommand` messages,
/// validates and applies them against the registry records, queues player
/// notifications, and emits `ClanEvent` messages.
///
/// Runs in `TickPhase::PostUpdate`. The whole load-mutate-save cycle for
/// each blob happens inside this one system, which is what keeps the
/// read-modify-write pattern safe on the single-threaded schedule.
pub fn apply_clan_commands(world: &mut World) {
    let commands: Vec<ClanCommand> = {
        let Some(mut messages) = world.get_resource_mut::<Messages<ClanCommand>>() else {
            return;
        };
        messages.drain().collect()
    };

    if commands.is_empty() {
        return;
    }

    let now_ms = world.resource::<HostClock>().now_ms();
    let registry = world.remove_resource::<ClanRegistry>().unwrap();
    let outbox = world.remove_resource::<Outbox>().unwrap();
    let rng = world.remove_resource::<ClanRng>().unwrap();
    let directory = world.remove_resource::<PlayerDirectory>().unwrap();

    let mut ctx = ApplyCtx {
        clans: registry.clans(),
        requests: registry.join_requests(),
        protection: registry.protection(),
        clans_dirty: false,
        requests_dirty: false,
        protection_dirty: false,
        outbox,
        rng,
        directory,
        now_ms,
        events: Vec::new(),
    };

    for cmd in &commands {
        let issuer = cmd.issuer.as_str();
        let result = match &cmd.kind {
            ClanCommandKind::Create { name } => {
                apply_membership::apply_create(&mut ctx, world, issuer, name)
            }
            ClanCommandKind::RequestJoin { clan } => {
                apply_membership::apply_request_join(&mut ctx, world, issuer, clan)
            }
            ClanCommandKind::ResolveJoin { requester, approve } => {
                apply_membership::apply_resolve_join(&mut ctx, world, issuer, requester, *approve)
            }
            ClanCommandKind::Invite { target, confirm } => {
                apply_membership::apply_invite(&mut ctx, world, issuer, target, *confirm)
            }
            ClanCommandKind::Kick { target } => {
                apply_membership::apply_kick(&mut ctx, world, issuer, target)
            }
            ClanCommandKind::Leave { confirm } => {
                apply_membership::apply_leave(&mut ctx, world, issuer, *confirm)
            }
            ClanCommandKind::Rename { new_name } => {
                apply_admin::apply_rename(&mut ctx, world, issuer, new_name)
            }
            ClanCommandKind::Disband { confirm } => {
                apply_admin::apply_disband(&mut ctx, world, issuer, *confirm)
            }
            ClanCommandKind::ToggleProtection => {
                apply_admin::apply_toggle_protection(&mut ctx, world, issuer)
            }
            ClanCommandKind::Chat { message } => {
                apply_chat::apply_chat(&mut ctx, world, issuer, message)
            }
        };
        if let Err(err) = result {
            ctx.deny(issuer, &err);
        }
    }

    if ctx.clans_dirty {
        registry.save_clans(&ctx.clans);
    }
    if ctx.requests_dirty {
        registry.save_join_requests(&ctx.requests);
    }
    if ctx.protection_dirty {
        registry.save_protection(&ctx.protection);
    }

    let events = std::mem::take(&mut ctx.events);
    if let Some(mut messages) = world.get_resource_mut::<Messages<ClanEvent>>() {
        messages.write_batch(events);
    }

    world.insert_resource(registry);
    world.insert_resource(ctx.outbox);
    world.insert_resource(ctx.rng);
    world.insert_resource(ctx.directory);
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::ecs::app::build_clan_app;
    use crate::ecs::schedule::HostTick;
    use crate::ecs::spawn::spawn_player;
    use crate::store::MemoryStore;
    use crate::store::PropertyStore;

    use super::*;

    fn write_command(world: &mut World, cmd: ClanCommand) {
        world.resource_mut::<Messages<ClanCommand>>().write(cmd);
    }

    fn tick(app: &mut bevy_app::App) {
        app.world_mut().run_schedule(HostTick);
    }

    #[test]
    fn create_writes_the_clans_blob() {
        let store = Arc::new(MemoryStore::new());
        let mut app = build_clan_app(store.clone());
        spawn_player(app.world_mut(), "Steve");

        write_command(
            app.world_mut(),
            ClanCommand::new(
                "Steve",
                ClanCommandKind::Create {
                    name: "Alpha".to_string(),
                },
            ),
        );
        tick(&mut app);

        let blob = store.get("clans").expect("clans blob written");
        assert!(blob.contains("\"Alpha\""));
        assert!(blob.contains("\"Steve\""));

        // Reactive event emitted for the reactions phase
        let events = app.world().resource::<Messages<ClanEvent>>();
        assert!(!events.is_empty());
    }

    #[test]
    fn rejected_command_surfaces_message_and_error_cue() {
        let mut app = build_clan_app(Arc::new(MemoryStore::new()));
        spawn_player(app.world_mut(), "Steve");

        write_command(
            app.world_mut(),
            ClanCommand::new(
                "Steve",
                ClanCommandKind::Create {
                    name: "xx".to_string(),
                },
            ),
        );
        tick(&mut app);

        let outbox = app.world().resource::<Outbox>();
        assert!(
            outbox
                .messages_for("Steve")
                .iter()
                .any(|m| m.contains("Invalid clan name"))
        );
        assert_eq!(outbox.sounds_for("Steve"), vec![SoundCue::Error]);
    }

    #[test]
    fn a_batch_applies_in_submission_order() {
        let store = Arc::new(MemoryStore::new());
        let mut app = build_clan_app(store);
        spawn_player(app.world_mut(), "Steve");
        spawn_player(app.world_mut(), "Alex");

        write_command(
            app.world_mut(),
            ClanCommand::new(
                "Steve",
                ClanCommandKind::Create {
                    name: "Alpha".to_string(),
                },
            ),
        );
        write_command(
            app.world_mut(),
            ClanCommand::new(
                "Alex",
                ClanCommandKind::RequestJoin {
                    clan: "Alpha".to_string(),
                },
            ),
        );
        tick(&mut app);

        let registry = app.world().resource::<ClanRegistry>();
        assert!(registry.clans().contains_key("Alpha"));
        assert_eq!(registry.join_requests()["Alex"].clan, "Alpha");
    }

    #[test]
    fn quiet_tick_leaves_the_store_untouched() {
        let store = Arc::new(MemoryStore::new());
        let mut app = build_clan_app(store.clone());
        spawn_player(app.world_mut(), "Steve");
        tick(&mut app);

        assert!(store.snapshot().is_empty());
    }

    #[test]
    fn notifications_skip_offline_members() {
        let store = Arc::new(MemoryStore::new());
        let mut app = build_clan_app(store);
        spawn_player(app.world_mut(), "Steve");
        spawn_player(app.world_mut(), "Alex");
        write_command(
            app.world_mut(),
            ClanCommand::new(
                "Steve",
                ClanCommandKind::Create {
                    name: "Alpha".to_string(),
                },
            ),
        );
        tick(&mut app);
        crate::ecs::spawn::despawn_player(app.world_mut(), "Steve");

        write_command(
            app.world_mut(),
            ClanCommand::new(
                "Alex",
                ClanCommandKind::RequestJoin {
                    clan: "Alpha".to_string(),
                },
            ),
        );
        tick(&mut app);

        let outbox = app.world().resource::<Outbox>();
        assert!(
            !outbox
                .messages_for("Steve")
                .iter()
                .any(|m| m.contains("wants to join"))
        );
        assert!(
            outbox
                .messages_for("Alex")
                .iter()
                .any(|m| m.contains("Request to join Alpha sent"))
        );
    }
}
