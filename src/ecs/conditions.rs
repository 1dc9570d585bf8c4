use bevy_ecs::system::Res;

use super::clock::{HostClock, TICKS_PER_SECOND};

// Internal check function for testability.

fn second_check(tick: u64) -> bool {
    tick.is_multiple_of(TICKS_PER_SECOND)
}

/// Run condition: once per second of host time (every 20 ticks).
pub fn every_second(clock: Res<HostClock>) -> bool {
    second_check(clock.tick)
}
