use std::collections::BTreeMap;
use std::sync::Arc;

use bevy_ecs::resource::Resource;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::model::{Clan, JoinRequest, TopClanEntry};
use crate::store::{
    PROP_CLANS, PROP_JOIN_REQUESTS, PROP_PROTECTION, PROP_TOP_CLANS, PropertyStore,
};

/// Typed repository over the host property store.
///
/// Each data set is one JSON blob under a fixed key, loaded whole and
/// written back whole. The command applicator is the only mutator and runs
/// exclusively, so a load-mutate-save cycle never interleaves with another;
/// the store itself guards cross-thread access from the host.
#[derive(Resource, Clone)]
pub struct ClanRegistry {
    store: Arc<dyn PropertyStore>,
}

impl ClanRegistry {
    pub fn new(store: Arc<dyn PropertyStore>) -> Self {
        Self { store }
    }

    fn load<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        let Some(text) = self.store.get(key) else {
            return T::default();
        };
        match serde_json::from_str(&text) {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(key, "discarding unreadable blob: {err}");
                T::default()
            }
        }
    }

    fn save<T: Serialize>(&self, key: &str, value: &T) {
        match serde_json::to_string(value) {
            Ok(text) => self.store.set(key, &text),
            Err(err) => tracing::warn!(key, "blob serialization failed: {err}"),
        }
    }

    pub fn clans(&self) -> BTreeMap<String, Clan> {
        self.load(PROP_CLANS)
    }

    pub fn save_clans(&self, clans: &BTreeMap<String, Clan>) {
        self.save(PROP_CLANS, clans);
    }

    pub fn join_requests(&self) -> BTreeMap<String, JoinRequest> {
        self.load(PROP_JOIN_REQUESTS)
    }

    pub fn save_join_requests(&self, requests: &BTreeMap<String, JoinRequest>) {
        self.save(PROP_JOIN_REQUESTS, requests);
    }

    pub fn protection(&self) -> BTreeMap<String, bool> {
        self.load(PROP_PROTECTION)
    }

    pub fn save_protection(&self, protection: &BTreeMap<String, bool>) {
        self.save(PROP_PROTECTION, protection);
    }

    /// Whether same-clan protection is enabled for a clan. Absent ⇒ false.
    pub fn protection_enabled(&self, clan: &str) -> bool {
        self.protection().get(clan).copied().unwrap_or(false)
    }

    pub fn top_clans(&self) -> Vec<TopClanEntry> {
        self.load(PROP_TOP_CLANS)
    }

    pub fn save_top_clans(&self, top: &[TopClanEntry]) {
        self.save(PROP_TOP_CLANS, &top);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    fn registry() -> ClanRegistry {
        ClanRegistry::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn empty_store_yields_empty_sets() {
        let reg = registry();
        assert!(reg.clans().is_empty());
        assert!(reg.join_requests().is_empty());
        assert!(reg.protection().is_empty());
        assert!(reg.top_clans().is_empty());
    }

    #[test]
    fn clans_round_trip() {
        let reg = registry();
        let mut clans = BTreeMap::new();
        clans.insert("Alpha".to_string(), Clan::found("Alpha", "Steve", 7));
        reg.save_clans(&clans);
        assert_eq!(reg.clans(), clans);
    }

    #[test]
    fn unreadable_blob_falls_back_to_default() {
        let store = Arc::new(MemoryStore::new());
        store.set(PROP_CLANS, "not json");
        let reg = ClanRegistry::new(store);
        assert!(reg.clans().is_empty());
    }

    #[test]
    fn protection_defaults_to_disabled() {
        let reg = registry();
        assert!(!reg.protection_enabled("Alpha"));
        let mut flags = BTreeMap::new();
        flags.insert("Alpha".to_string(), true);
        reg.save_protection(&flags);
        assert!(reg.protection_enabled("Alpha"));
        assert!(!reg.protection_enabled("Beta"));
    }
}
