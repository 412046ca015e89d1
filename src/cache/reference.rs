//! Reference Data Cache
//!
//! Typed Hit/Miss access to reference-table values held in a [`KeyValueStore`].
//! Values are stored as JSON; the TTL of a write comes from the
//! [`CacheDurationPolicy`] of the table it belongs to.

use std::future::Future;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

use crate::cache::{keys, CacheDurationPolicy, CacheResult, KeyValueStore};
use crate::domain::EmptyAware;
use crate::error::Result;

// == Reference Data Cache ==
#[derive(Clone)]
pub struct ReferenceDataCache {
    store: Arc<dyn KeyValueStore>,
    policy: CacheDurationPolicy,
}

impl ReferenceDataCache {
    pub fn new(store: Arc<dyn KeyValueStore>, policy: CacheDurationPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> &CacheDurationPolicy {
        &self.policy
    }

    // == Get With Result ==
    /// Looks up `key`. A miss is [`CacheResult::Miss`], never an error.
    ///
    /// Bytes that do not decode as `T` are reported as a serialization error.
    pub async fn get_with_result<T: DeserializeOwned>(&self, key: &str) -> Result<CacheResult<T>> {
        let cached: Option<T> = self
            .store
            .get(key)
            .await?
            .map(|bytes| serde_json::from_slice(&bytes))
            .transpose()?;

        debug!(key, hit = cached.is_some(), "reference cache lookup");
        Ok(CacheResult::from(cached))
    }

    // == Set ==
    /// Stores `value` under `key` for the TTL of `table`.
    pub async fn set<T: Serialize + ?Sized>(&self, key: &str, table: &str, value: &T) -> Result<()> {
        let bytes = serde_json::to_vec(value)?;
        let ttl = self.policy.cache_duration(table);
        self.store.set(key, bytes, ttl).await
    }

    pub async fn remove(&self, key: &str) -> Result<bool> {
        self.store.remove(key).await
    }

    // == Invalidate Table ==
    /// Drops every cached key of `table`.
    pub async fn invalidate_table(&self, table: &str) -> Result<usize> {
        let removed = self.store.remove_by_prefix(&keys::table_pattern(table)).await?;
        debug!(table, removed, "invalidated reference table");
        Ok(removed)
    }

    // == Get Or Load ==
    /// Returns the cached value, or runs `loader` and caches what it returns.
    ///
    /// Empty results are returned but not cached, so a later write to the
    /// table becomes visible without waiting for the TTL. A failed cache write
    /// is logged and the loaded value is still returned.
    ///
    /// # Arguments
    /// * `key` - Cache key, from [`keys`]
    /// * `table` - Table the key belongs to, selects the TTL
    /// * `loader` - Reads the value from the source of truth
    pub async fn get_or_load<T, F, Fut>(&self, key: &str, table: &str, loader: F) -> Result<T>
    where
        T: Serialize + DeserializeOwned + EmptyAware,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if let CacheResult::Hit(value) = self.get_with_result(key).await? {
            return Ok(value);
        }

        let value = loader().await?;
        if !value.is_empty_value() {
            if let Err(e) = self.set(key, table, &value).await {
                warn!(key, table, error = %e, "reference cache population failed");
            }
        }
        Ok(value)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::domain::ReferenceDataEntry;
    use crate::error::Error;
    use std::time::Duration;

    fn cache() -> (Arc<MemoryStore>, ReferenceDataCache) {
        let store = Arc::new(MemoryStore::new(100));
        let cache = ReferenceDataCache::new(store.clone(), CacheDurationPolicy::default());
        (store, cache)
    }

    #[tokio::test]
    async fn test_get_with_result_miss() {
        let (_, cache) = cache();
        let result: CacheResult<ReferenceDataEntry> = cache
            .get_with_result(&keys::by_id_key("BodyParts", "bodypart-1"))
            .await
            .unwrap();
        assert!(result.is_miss());
    }

    #[tokio::test]
    async fn test_set_then_hit() {
        let (_, cache) = cache();
        let entry = ReferenceDataEntry::new("bodypart-1", "Chest", "Pectoral region");
        let key = keys::by_id_key("BodyParts", &entry.id);

        cache.set(&key, "BodyParts", &entry).await.unwrap();

        let result: CacheResult<ReferenceDataEntry> = cache.get_with_result(&key).await.unwrap();
        assert_eq!(result, CacheResult::Hit(entry));
    }

    #[tokio::test]
    async fn test_undecodable_bytes_are_an_error() {
        let (store, cache) = cache();
        store
            .set("ReferenceTable:BodyParts:GetAll", b"not json".to_vec(), Duration::from_secs(60))
            .await
            .unwrap();

        let result = cache
            .get_with_result::<Vec<ReferenceDataEntry>>("ReferenceTable:BodyParts:GetAll")
            .await;
        assert!(matches!(result, Err(Error::Serialization(_))));
    }

    #[tokio::test]
    async fn test_invalidate_table_only_touches_that_table() {
        let (store, cache) = cache();
        let entry = ReferenceDataEntry::new("equipment-1", "Barbell", "");
        cache.set(&keys::all_key("Equipment"), "Equipment", &vec![entry.clone()]).await.unwrap();
        cache.set(&keys::by_id_key("Equipment", "equipment-1"), "Equipment", &entry).await.unwrap();
        cache.set(&keys::all_key("BodyParts"), "BodyParts", &vec![entry]).await.unwrap();

        assert_eq!(cache.invalidate_table("Equipment").await.unwrap(), 2);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_or_load_caches_non_empty() {
        let (_, cache) = cache();
        let key = keys::by_value_key("DifficultyLevels", "Beginner");

        let loaded = cache
            .get_or_load(&key, "DifficultyLevels", || async {
                Ok(ReferenceDataEntry::new("difficultylevel-1", "Beginner", ""))
            })
            .await
            .unwrap();
        assert_eq!(loaded.value, "Beginner");

        // Second call must be served from the cache
        let cached = cache
            .get_or_load(&key, "DifficultyLevels", || async {
                Err::<ReferenceDataEntry, _>(Error::Storage("source should not be called".into()))
            })
            .await
            .unwrap();
        assert_eq!(cached, loaded);
    }

    #[tokio::test]
    async fn test_get_or_load_skips_empty() {
        let (store, cache) = cache();
        let key = keys::by_id_key("Equipment", "missing");

        let loaded = cache
            .get_or_load(&key, "Equipment", || async { Ok(ReferenceDataEntry::empty()) })
            .await
            .unwrap();

        assert!(loaded.is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_or_load_returns_value_when_cache_rejects_it() {
        let (store, cache) = cache();
        let long_id = "x".repeat(crate::cache::MAX_KEY_LENGTH);
        let key = keys::by_id_key("Equipment", &long_id);

        let loaded = cache
            .get_or_load(&key, "Equipment", || async {
                Ok(ReferenceDataEntry::new(long_id.clone(), "Barbell", ""))
            })
            .await
            .unwrap();

        assert_eq!(loaded.value, "Barbell");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_get_or_load_propagates_loader_error() {
        let (store, cache) = cache();
        let result = cache
            .get_or_load(&keys::all_key("Equipment"), "Equipment", || async {
                Err::<Vec<ReferenceDataEntry>, _>(Error::Storage("down".into()))
            })
            .await;

        assert!(matches!(result, Err(Error::Storage(_))));
        assert!(store.is_empty().await);
    }
}
