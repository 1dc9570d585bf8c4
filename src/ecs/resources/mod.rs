pub mod cooldowns;
pub mod directory;
pub mod effects;
pub mod outbox;
pub mod registry;
pub mod rng;

pub use cooldowns::AttackCooldowns;
pub use directory::PlayerDirectory;
pub use effects::{EffectPort, Effects, NoopEffects};
pub use outbox::{Delivery, Outbox, Payload, SoundCue};
pub use registry::ClanRegistry;
pub use rng::ClanRng;
