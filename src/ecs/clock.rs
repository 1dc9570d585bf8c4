use bevy_ecs::resource::Resource;
use bevy_ecs::system::ResMut;

/// Host tick rate: twenty ticks per second of host time.
pub const TICKS_PER_SECOND: u64 = 20;

/// Milliseconds of host time per tick.
pub const MS_PER_TICK: u64 = 1000 / TICKS_PER_SECOND;

/// Host clock resource tracking elapsed ticks since process start.
///
/// The `advance_clock` system moves it forward in `TickPhase::Last`, so
/// every system in a tick sees the same current time.
#[derive(Resource, Debug, Default)]
pub struct HostClock {
    pub tick: u64,
}

impl HostClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Millisecond timestamp derived from the tick counter. Informational
    /// (clan `created`, request `timestamp`) and never compared across
    /// process restarts.
    pub fn now_ms(&self) -> u64 {
        self.tick * MS_PER_TICK
    }

    pub fn advance(&mut self) {
        self.tick += 1;
    }
}

/// Bevy system advancing the host clock by one tick.
pub fn advance_clock(mut clock: ResMut<HostClock>) {
    clock.advance();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_tick_zero() {
        let clock = HostClock::new();
        assert_eq!(clock.tick, 0);
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn one_second_is_twenty_ticks() {
        let mut clock = HostClock::new();
        for _ in 0..TICKS_PER_SECOND {
            clock.advance();
        }
        assert_eq!(clock.now_ms(), 1000);
    }
}
