use std::collections::BTreeMap;

use bevy_ecs::entity::Entity;
use bevy_ecs::resource::Resource;

/// Bidirectional mapping between online player names and their entities.
/// Presence in the directory is what "online" means to every system here.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerDirectory {
    by_name: BTreeMap<String, Entity>,
    by_entity: BTreeMap<Entity, String>,
}

impl PlayerDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an online player. Panics on a duplicate name; the host
    /// never has two sessions under one name.
    pub fn insert(&mut self, name: &str, entity: Entity) {
        let prev = self.by_name.insert(name.to_string(), entity);
        assert!(prev.is_none(), "duplicate online player {name}");
        self.by_entity.insert(entity, name.to_string());
    }

    pub fn remove(&mut self, name: &str) -> Option<Entity> {
        let entity = self.by_name.remove(name)?;
        self.by_entity.remove(&entity);
        Some(entity)
    }

    pub fn entity(&self, name: &str) -> Option<Entity> {
        self.by_name.get(name).copied()
    }

    pub fn name(&self, entity: Entity) -> Option<&str> {
        self.by_entity.get(&entity).map(String::as_str)
    }

    pub fn is_online(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    /// The subset of `names` currently online, in the given order.
    pub fn online_of<'a>(&self, names: &'a [String]) -> Vec<&'a str> {
        names
            .iter()
            .filter(|n| self.is_online(n))
            .map(String::as_str)
            .collect()
    }
}
