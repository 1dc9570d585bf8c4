use bevy_app::{App, Plugin};

use super::systems::combat::CombatPlugin;
use super::systems::leaderboard::LeaderboardPlugin;
use super::systems::presence::PresencePlugin;

/// Aggregate plugin installing the three domain plugins. The command
/// applicator itself is registered by `build_clan_app` alongside the
/// schedule.
pub struct ClanPlugin;

impl Plugin for ClanPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((CombatPlugin, PresencePlugin, LeaderboardPlugin));
    }
}
