use bevy_ecs::entity::Entity;
use bevy_ecs::message::Messages;
use bevy_ecs::world::World;

use crate::ecs::components::{Membership, PlayerId};
use crate::ecs::events::PlayerSpawned;
use crate::ecs::resources::{ClanRegistry, PlayerDirectory};

/// Register a player entering the world: rebuild their membership from the
/// stored records, register them in the directory, and emit the spawn
/// message the presence system reacts to.
pub fn spawn_player(world: &mut World, name: &str) -> Entity {
    let (clans, requests) = {
        let registry = world.resource::<ClanRegistry>();
        (registry.clans(), registry.join_requests())
    };
    let membership = Membership::from_records(name, &clans, &requests);
    let entity = world
        .spawn((
            PlayerId {
                name: name.to_string(),
            },
            membership,
        ))
        .id();
    world.resource_mut::<PlayerDirectory>().insert(name, entity);
    if let Some(mut messages) = world.get_resource_mut::<Messages<PlayerSpawned>>() {
        messages.write(PlayerSpawned { entity });
    }
    entity
}

/// Remove a player leaving the world. Their membership survives in the
/// stored records; only the per-process entity goes away.
pub fn despawn_player(world: &mut World, name: &str) {
    let Some(entity) = world.resource_mut::<PlayerDirectory>().remove(name) else {
        return;
    };
    world.despawn(entity);
}
