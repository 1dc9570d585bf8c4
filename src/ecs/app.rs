use std::sync::Arc;

use bevy_app::App;
use bevy_ecs::message::MessageRegistry;
use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs};

use crate::store::PropertyStore;

use super::clock::HostClock;
use super::commands::{ClanCommand, apply_clan_commands};
use super::events::{AttackAttempt, AttackVerdict, ClanEvent, PlayerSpawned};
use super::plugin::ClanPlugin;
use super::resources::{AttackCooldowns, ClanRegistry, ClanRng, Effects, Outbox, PlayerDirectory};
use super::schedule::{TickPhase, configure_host_schedule};

/// Build a headless app over the given property store, with the default
/// RNG seed.
///
/// Manual tick control: the host adapter writes messages, runs a tick,
/// then drains the outbox and verdicts:
/// ```no_run
/// # use std::sync::Arc;
/// # use clankit::ecs::{build_clan_app, HostTick};
/// # use clankit::store::MemoryStore;
/// let mut app = build_clan_app(Arc::new(MemoryStore::new()));
/// app.world_mut().run_schedule(HostTick);
/// ```
pub fn build_clan_app(store: Arc<dyn PropertyStore>) -> App {
    build_clan_app_seeded(store, 42)
}

/// Build a headless app with an explicit RNG seed, pinning the
/// ownership-transfer choice for reproducible tests.
pub fn build_clan_app_seeded(store: Arc<dyn PropertyStore>, seed: u64) -> App {
    let mut app = App::empty();

    // Core resources
    app.insert_resource(HostClock::new());
    app.insert_resource(ClanRegistry::new(store));
    app.insert_resource(PlayerDirectory::new());
    app.insert_resource(Outbox::new());
    app.insert_resource(AttackCooldowns::new());
    app.insert_resource(Effects::noop());
    app.insert_resource(ClanRng::seeded(seed));

    // Register message types
    MessageRegistry::register_message::<ClanCommand>(app.world_mut());
    MessageRegistry::register_message::<ClanEvent>(app.world_mut());
    MessageRegistry::register_message::<PlayerSpawned>(app.world_mut());
    MessageRegistry::register_message::<AttackAttempt>(app.world_mut());
    MessageRegistry::register_message::<AttackVerdict>(app.world_mut());

    // Build schedule with message rotation + the command applicator. The
    // executor is single-threaded: one logical thread is the concurrency
    // model the registry's read-modify-write cycles rely on.
    let mut schedule = configure_host_schedule(ExecutorKind::SingleThreaded);
    schedule.add_systems(bevy_ecs::message::message_update_system.in_set(TickPhase::PreUpdate));
    schedule.add_systems(apply_clan_commands.in_set(TickPhase::PostUpdate));
    app.add_schedule(schedule);

    app.add_plugins(ClanPlugin);
    app
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ecs::schedule::HostTick;
    use crate::store::MemoryStore;

    #[test]
    fn app_builds_without_panic() {
        let _app = build_clan_app(Arc::new(MemoryStore::new()));
    }

    #[test]
    fn clock_starts_at_zero() {
        let app = build_clan_app(Arc::new(MemoryStore::new()));
        assert_eq!(app.world().resource::<HostClock>().tick, 0);
    }

    #[test]
    fn single_tick_advances_clock() {
        let mut app = build_clan_app(Arc::new(MemoryStore::new()));
        app.world_mut().run_schedule(HostTick);
        assert_eq!(app.world().resource::<HostClock>().tick, 1);
    }

    #[test]
    fn registry_reads_through_the_given_store() {
        let store = Arc::new(MemoryStore::new());
        store.set("clans", "{}");
        let app = build_clan_app(store);
        assert!(app.world().resource::<ClanRegistry>().clans().is_empty());
    }
}
