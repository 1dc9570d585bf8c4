//! Leaderboard cache maintenance: whenever any clan event fired this tick,
//! re-rank the registry and persist the top ten.

use bevy_app::{App, Plugin};
use bevy_ecs::message::MessageReader;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::Res;

use crate::ecs::events::ClanEvent;
use crate::ecs::resources::ClanRegistry;
use crate::ecs::schedule::{HostTick, TickPhase};
use crate::model::rank_clans;

pub struct LeaderboardPlugin;

impl Plugin for LeaderboardPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(HostTick, refresh_top_clans.in_set(TickPhase::Reactions));
    }
}

fn refresh_top_clans(mut events: MessageReader<ClanEvent>, registry: Res<ClanRegistry>) {
    if events.read().count() == 0 {
        return;
    }
    let ranked = rank_clans(&registry.clans());
    registry.save_top_clans(&ranked);
}
