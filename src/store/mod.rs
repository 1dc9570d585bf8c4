pub mod file;
pub mod props;

pub use file::JsonFileStore;
pub use props::{MemoryStore, PropertyStore};

/// Fixed blob keys in the host property store.
pub const PROP_CLANS: &str = "clans";
pub const PROP_TOP_CLANS: &str = "topClans";
pub const PROP_JOIN_REQUESTS: &str = "clanJoinRequests";
pub const PROP_PROTECTION: &str = "clanProtection";
