pub mod app;
pub mod clock;
pub mod commands;
pub mod components;
pub mod conditions;
pub mod events;
pub mod plugin;
pub mod resources;
pub mod schedule;
pub mod spawn;
pub mod systems;
pub mod test_helpers;

pub use app::{build_clan_app, build_clan_app_seeded};
pub use clock::{HostClock, MS_PER_TICK, TICKS_PER_SECOND};
pub use commands::{ClanCommand, ClanCommandKind, Confirm, apply_clan_commands};
pub use components::{Membership, PlayerId, Role};
pub use conditions::every_second;
pub use events::{AttackAttempt, AttackVerdict, BlockReason, ClanEvent, PlayerSpawned};
pub use plugin::ClanPlugin;
pub use resources::{
    AttackCooldowns, ClanRegistry, ClanRng, EffectPort, Effects, NoopEffects, Outbox,
    PlayerDirectory, SoundCue,
};
pub use schedule::{HostTick, TickPhase, configure_host_schedule};
pub use spawn::{despawn_player, spawn_player};
