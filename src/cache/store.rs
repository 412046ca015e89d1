//! Memory Store Module
//!
//! In-process key-value store combining HashMap storage with LRU eviction and
//! TTL expiration. Expired entries are dropped lazily on read, or in bulk by
//! [`MemoryStore::purge_expired`].

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::cache::{CacheEntry, KeyValueStore, LruTracker, StoreEvent, StoreStats};
use crate::cache::{MAX_KEY_LENGTH, MAX_VALUE_SIZE};
use crate::config::CacheConfig;
use crate::error::{Error, Result};

// == Inner State ==
#[derive(Debug)]
struct Inner {
    entries: HashMap<String, CacheEntry>,
    lru: LruTracker,
    stats: StoreStats,
    max_entries: usize,
}

impl Inner {
    fn remove_entry(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        if removed {
            self.lru.remove(key);
            self.stats.entries = self.entries.len();
        }
        removed
    }

    fn get(&mut self, key: &str) -> Option<Vec<u8>> {
        let expired = match self.entries.get(key) {
            None => {
                self.stats.record(StoreEvent::Miss);
                return None;
            }
            Some(entry) => entry.is_expired(),
        };

        if expired {
            self.remove_entry(key);
            self.stats.record(StoreEvent::Expired);
            return None;
        }

        self.stats.record(StoreEvent::Hit);
        self.lru.touch(key);
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    fn set(&mut self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        if key.is_empty() || key.len() > MAX_KEY_LENGTH {
            return Err(Error::InvalidRequest(format!(
                "Key length must be between 1 and {} bytes",
                MAX_KEY_LENGTH
            )));
        }

        if value.len() > MAX_VALUE_SIZE {
            return Err(Error::InvalidRequest(format!(
                "Value exceeds maximum size of {} bytes",
                MAX_VALUE_SIZE
            )));
        }

        // Make room only when inserting a new key
        if !self.entries.contains_key(key) && self.entries.len() >= self.max_entries {
            match self.lru.evict_oldest() {
                Some(evicted) => {
                    self.entries.remove(&evicted);
                    self.stats.record(StoreEvent::Evicted);
                    debug!(key = %evicted, "evicted least recently used entry");
                }
                None => {
                    return Err(Error::Cache(
                        "Store is full and eviction failed".to_string(),
                    ))
                }
            }
        }

        self.entries
            .insert(key.to_string(), CacheEntry::new(value, Some(ttl)));
        self.lru.touch(key);
        self.stats.entries = self.entries.len();
        Ok(())
    }

    fn remove_by_prefix(&mut self, prefix: &str) -> usize {
        let keys: Vec<String> = self
            .entries
            .keys()
            .filter(|key| key.starts_with(prefix))
            .cloned()
            .collect();

        for key in &keys {
            self.remove_entry(key);
            self.stats.record(StoreEvent::Invalidated);
        }
        keys.len()
    }

    fn purge_expired(&mut self) -> usize {
        let expired: Vec<String> = self
            .entries
            .iter()
            .filter(|(_, entry)| entry.is_expired())
            .map(|(key, _)| key.clone())
            .collect();

        for key in &expired {
            self.remove_entry(key);
        }
        expired.len()
    }
}

// == Memory Store ==
/// Thread-safe in-memory [`KeyValueStore`].
#[derive(Debug)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a store holding at most `max_entries` entries.
    pub fn new(max_entries: usize) -> Self {
        Self {
            inner: Mutex::new(Inner {
                entries: HashMap::new(),
                lru: LruTracker::new(),
                stats: StoreStats::default(),
                max_entries: max_entries.max(1),
            }),
        }
    }

    /// Creates a store sized by the cache configuration.
    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_entries)
    }

    /// Snapshot of the counters.
    pub async fn stats(&self) -> StoreStats {
        let inner = self.inner.lock().await;
        let mut stats = inner.stats.clone();
        stats.entries = inner.entries.len();
        stats
    }

    /// Drops every expired entry. Returns how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let removed = self.inner.lock().await.purge_expired();
        if removed > 0 {
            debug!(removed, "purged expired entries");
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.inner.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        Ok(self.inner.lock().await.get(key))
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<()> {
        self.inner.lock().await.set(key, value, ttl)
    }

    async fn remove(&self, key: &str) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        let removed = inner.remove_entry(key);
        if removed {
            inner.stats.record(StoreEvent::Invalidated);
        }
        Ok(removed)
    }

    async fn remove_by_prefix(&self, prefix: &str) -> Result<usize> {
        Ok(self.inner.lock().await.remove_by_prefix(prefix))
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: Duration = Duration::from_secs(3600);

    #[tokio::test]
    async fn test_store_set_and_get() {
        let store = MemoryStore::new(100);

        store.set("key1", b"value1".to_vec(), HOUR).await.unwrap();

        assert_eq!(store.get("key1").await.unwrap(), Some(b"value1".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_get_missing_is_none() {
        let store = MemoryStore::new(100);
        assert_eq!(store.get("nonexistent").await.unwrap(), None);
        assert_eq!(store.stats().await.misses, 1);
    }

    #[tokio::test]
    async fn test_store_overwrite() {
        let store = MemoryStore::new(100);

        store.set("key1", b"value1".to_vec(), HOUR).await.unwrap();
        store.set("key1", b"value2".to_vec(), HOUR).await.unwrap();

        assert_eq!(store.get("key1").await.unwrap(), Some(b"value2".to_vec()));
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_store_ttl_expiration() {
        let store = MemoryStore::new(100);

        store
            .set("key1", b"value1".to_vec(), Duration::from_millis(30))
            .await
            .unwrap();
        assert!(store.get("key1").await.unwrap().is_some());

        tokio::time::sleep(Duration::from_millis(60)).await;

        assert_eq!(store.get("key1").await.unwrap(), None);
        let stats = store.stats().await;
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.entries, 0);
    }

    #[tokio::test]
    async fn test_store_lru_eviction() {
        let store = MemoryStore::new(3);

        store.set("key1", b"1".to_vec(), HOUR).await.unwrap();
        store.set("key2", b"2".to_vec(), HOUR).await.unwrap();
        store.set("key3", b"3".to_vec(), HOUR).await.unwrap();

        // key1 becomes most recently used, key2 is now the oldest
        store.get("key1").await.unwrap();
        store.set("key4", b"4".to_vec(), HOUR).await.unwrap();

        assert_eq!(store.len().await, 3);
        assert!(store.get("key1").await.unwrap().is_some());
        assert!(store.get("key2").await.unwrap().is_none());
        assert_eq!(store.stats().await.evictions, 1);
    }

    #[tokio::test]
    async fn test_store_remove() {
        let store = MemoryStore::new(100);
        store.set("key1", b"1".to_vec(), HOUR).await.unwrap();

        assert!(store.remove("key1").await.unwrap());
        assert!(!store.remove("key1").await.unwrap());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_store_remove_by_prefix() {
        let store = MemoryStore::new(100);
        store.set("ReferenceTable:Equipment:GetAll", b"[]".to_vec(), HOUR).await.unwrap();
        store.set("ReferenceTable:Equipment:GetById:eq-1", b"{}".to_vec(), HOUR).await.unwrap();
        store.set("ReferenceTable:BodyParts:GetAll", b"[]".to_vec(), HOUR).await.unwrap();

        let removed = store
            .remove_by_prefix("ReferenceTable:Equipment:")
            .await
            .unwrap();

        assert_eq!(removed, 2);
        assert_eq!(store.len().await, 1);
        assert_eq!(store.stats().await.invalidations, 2);
    }

    #[tokio::test]
    async fn test_store_purge_expired() {
        let store = MemoryStore::new(100);
        store.set("short", b"1".to_vec(), Duration::from_millis(20)).await.unwrap();
        store.set("long", b"2".to_vec(), HOUR).await.unwrap();

        tokio::time::sleep(Duration::from_millis(50)).await;

        assert_eq!(store.purge_expired().await, 1);
        assert_eq!(store.len().await, 1);
        assert!(store.get("long").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_store_rejects_bad_keys_and_values() {
        let store = MemoryStore::new(100);

        let long_key = "x".repeat(MAX_KEY_LENGTH + 1);
        assert!(matches!(
            store.set(&long_key, Vec::new(), HOUR).await,
            Err(Error::InvalidRequest(_))
        ));
        assert!(matches!(
            store.set("", Vec::new(), HOUR).await,
            Err(Error::InvalidRequest(_))
        ));

        let large_value = vec![0u8; MAX_VALUE_SIZE + 1];
        assert!(matches!(
            store.set("key", large_value, HOUR).await,
            Err(Error::InvalidRequest(_))
        ));
    }
}
