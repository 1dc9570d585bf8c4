use std::collections::BTreeMap;
use std::sync::Mutex;

/// The host's key-value property store: string blobs under string keys.
///
/// Implementations take `&self` and guard their backing map internally so a
/// host sharing the store from another thread keeps single-writer-at-a-time
/// semantics. All registry state is serialized as JSON text under the fixed
/// keys in [`crate::store`].
pub trait PropertyStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str);
}

/// In-memory store. The default for tests and for hosts that persist the
/// property map themselves.
#[derive(Debug, Default)]
pub struct MemoryStore {
    props: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the full property map, for assertions.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        self.props.lock().unwrap().clone()
    }
}

impl PropertyStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.props.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) {
        self.props
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }
}
