pub mod combat;
pub mod leaderboard;
pub mod presence;

pub use combat::{ATTACK_COOLDOWN_TICKS, CombatPlugin};
pub use leaderboard::LeaderboardPlugin;
pub use presence::PresencePlugin;
