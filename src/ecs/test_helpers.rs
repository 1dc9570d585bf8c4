use bevy_app::App;

use crate::ecs::clock::{HostClock, TICKS_PER_SECOND};
use crate::ecs::schedule::HostTick;

/// Run a single host tick.
pub fn tick(app: &mut App) {
    app.world_mut().run_schedule(HostTick);
}

/// Fast-forward by `n` seconds worth of ticks.
pub fn tick_seconds(app: &mut App, n: u64) {
    for _ in 0..n * TICKS_PER_SECOND {
        tick(app);
    }
}

/// The current tick count from the clock resource.
pub fn current_tick(app: &App) -> u64 {
    app.world().resource::<HostClock>().tick
}
