//! Clan management kernel for a hosted game server add-on.
//!
//! Players create, join, and administer clans; the registry lives as JSON
//! blobs in the host's key-value property store, a combat hook suppresses
//! same-clan hits with a short per-attacker cooldown, and all player
//! operations flow through a single-threaded tick schedule. Host engine
//! concerns (dialog rendering, real combat events, chat delivery) stay
//! behind the `PropertyStore`/`EffectPort` traits and the message types in
//! [`ecs`].

pub mod ecs;
pub mod error;
pub mod model;
pub mod store;
pub mod testutil;

pub use error::{ClanError, EffectError};
pub use model::{
    Clan, ClanSummary, JoinRequest, MAX_MEMBERS, RequestStatus, TopClanEntry, join_listing,
    rank_clans, validate_name,
};
pub use store::{JsonFileStore, MemoryStore, PropertyStore};
