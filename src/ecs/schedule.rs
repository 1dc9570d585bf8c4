use bevy_ecs::schedule::{ExecutorKind, IntoScheduleConfigs, Schedule, ScheduleLabel, SystemSet};

use super::clock::advance_clock;

/// Schedule label for one host update tick.
/// Run manually via `app.world_mut().run_schedule(HostTick)`.
#[derive(ScheduleLabel, Debug, Clone, PartialEq, Eq, Hash)]
pub struct HostTick;

/// Ordered phases within each tick.
///
/// Host adapters write `ClanCommand` / `AttackAttempt` / `PlayerSpawned`
/// messages before the tick; Update systems resolve combat and presence,
/// PostUpdate applies queued clan commands, Reactions consumes the
/// `ClanEvent` messages those produced, Last advances the clock.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum TickPhase {
    PreUpdate,
    Update,
    PostUpdate,
    Reactions,
    Last,
}

/// Build a configured `HostTick` schedule with phase ordering.
///
/// The single-threaded executor models the host's one logical thread: no
/// operation runs concurrently with another, which is what makes the
/// registry's read-modify-write cycles safe.
pub fn configure_host_schedule(executor: ExecutorKind) -> Schedule {
    let mut schedule = Schedule::new(HostTick);
    schedule.set_executor_kind(executor);
    schedule.configure_sets(
        (
            TickPhase::PreUpdate,
            TickPhase::Update,
            TickPhase::PostUpdate,
            TickPhase::Reactions,
            TickPhase::Last,
        )
            .chain(),
    );
    schedule.add_systems(advance_clock.in_set(TickPhase::Last));
    schedule
}
