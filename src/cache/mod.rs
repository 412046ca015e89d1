//! Cache Module
//!
//! Reference-data caching: key generation, per-table TTL policy, the typed
//! Hit/Miss cache and the in-memory key-value store backing it.

pub mod keys;

mod backend;
mod entry;
mod lru;
mod policy;
mod reference;
mod result;
mod stats;
mod store;


// Re-export public types
pub use backend::KeyValueStore;
pub use entry::CacheEntry;
pub use lru::LruTracker;
pub use policy::{CacheDurationPolicy, TableClass};
pub use reference::ReferenceDataCache;
pub use result::CacheResult;
pub use stats::{StoreEvent, StoreStats};
pub use store::MemoryStore;

// == Public Constants ==
/// Maximum allowed key length in bytes
pub const MAX_KEY_LENGTH: usize = 512;

/// Maximum allowed value size in bytes
pub const MAX_VALUE_SIZE: usize = 1024 * 1024; // 1 MB
