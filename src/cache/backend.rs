//! Key-Value Store Interface
//!
//! The byte-oriented cache the reference-data layer sits on. Implemented in
//! process by [`MemoryStore`](crate::cache::MemoryStore); a distributed cache
//! can implement it the same way.

use std::time::Duration;

use async_trait::async_trait;

use crate::error::Result;

#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Returns the live value for `key`, None on a miss or an expired entry.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key` for `ttl`, replacing any previous value.
    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()>;

    /// Removes `key`. Returns whether it was present.
    async fn remove(&self, key: &str) -> Result<bool>;

    /// Removes every key starting with `prefix`. Returns how many were removed.
    async fn remove_by_prefix(&self, prefix: &str) -> Result<usize>;
}
