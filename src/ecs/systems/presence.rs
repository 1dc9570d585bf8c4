//! Spawn-side projections: remind an owner of pending join requests when
//! they enter the world. Read-only over the request store.

use bevy_app::{App, Plugin};
use bevy_ecs::message::MessageReader;
use bevy_ecs::schedule::IntoScheduleConfigs;
use bevy_ecs::system::{Query, Res, ResMut};

use crate::ecs::components::{Membership, PlayerId};
use crate::ecs::events::PlayerSpawned;
use crate::ecs::resources::{ClanRegistry, Outbox, SoundCue};
use crate::ecs::schedule::{HostTick, TickPhase};

pub struct PresencePlugin;

impl Plugin for PresencePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(HostTick, notify_pending_on_spawn.in_set(TickPhase::Update));
    }
}

fn notify_pending_on_spawn(
    mut spawns: MessageReader<PlayerSpawned>,
    players: Query<(&PlayerId, &Membership)>,
    registry: Res<ClanRegistry>,
    mut outbox: ResMut<Outbox>,
) {
    for spawn in spawns.read() {
        let Ok((id, membership)) = players.get(spawn.entity) else {
            continue;
        };
        let Some(clan_name) = membership.owned_clan() else {
            continue;
        };
        let pending = registry
            .join_requests()
            .values()
            .filter(|r| r.clan == clan_name && r.is_pending())
            .count();
        if pending > 0 {
            outbox.message(
                &id.name,
                format!("[CLAN] You have {pending} pending join request(s)! Open manage clan to review"),
            );
            outbox.sound(&id.name, SoundCue::Chime);
        }
    }
}
