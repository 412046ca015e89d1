//! Reference Table Service
//!
//! Cached read path for one reference table: build the key, try the cache,
//! load from the source on a miss and store the result for the table's TTL.

use std::sync::Arc;

use tracing::debug;

use crate::cache::{keys, ReferenceDataCache};
use crate::domain::ReferenceDataEntry;
use crate::error::Result;
use crate::reference::ReferenceDataSource;

// == Reference Table Service ==
#[derive(Clone)]
pub struct ReferenceTableService {
    table: String,
    cache: ReferenceDataCache,
    source: Arc<dyn ReferenceDataSource>,
}

impl ReferenceTableService {
    /// # Arguments
    /// * `table` - Table name, as classified in the cache configuration
    /// * `cache` - Shared reference cache
    /// * `source` - Source of truth read on a miss
    pub fn new(
        table: impl Into<String>,
        cache: ReferenceDataCache,
        source: Arc<dyn ReferenceDataSource>,
    ) -> Self {
        Self {
            table: table.into(),
            cache,
            source,
        }
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    /// Every active entry of the table.
    pub async fn get_all(&self) -> Result<Vec<ReferenceDataEntry>> {
        let key = keys::all_key(&self.table);
        self.cache
            .get_or_load(&key, &self.table, || self.source.load_all(&self.table))
            .await
    }

    /// Entry with `id`, or the empty entry when there is none.
    pub async fn get_by_id(&self, id: &str) -> Result<ReferenceDataEntry> {
        if id.trim().is_empty() {
            debug!(table = %self.table, "empty id lookup");
            return Ok(ReferenceDataEntry::empty());
        }

        let key = keys::by_id_key(&self.table, id);
        self.cache
            .get_or_load(&key, &self.table, || async {
                Ok(self
                    .source
                    .load_by_id(&self.table, id)
                    .await?
                    .unwrap_or_else(ReferenceDataEntry::empty))
            })
            .await
    }

    /// Entry whose value matches `value` case-insensitively, or the empty entry.
    pub async fn get_by_value(&self, value: &str) -> Result<ReferenceDataEntry> {
        if value.trim().is_empty() {
            debug!(table = %self.table, "empty value lookup");
            return Ok(ReferenceDataEntry::empty());
        }

        let key = keys::by_value_key(&self.table, value);
        self.cache
            .get_or_load(&key, &self.table, || async {
                Ok(self
                    .source
                    .load_by_value(&self.table, value)
                    .await?
                    .unwrap_or_else(ReferenceDataEntry::empty))
            })
            .await
    }

    /// Drops every cached lookup of this table. Call after a write to it.
    pub async fn invalidate(&self) -> Result<usize> {
        self.cache.invalidate_table(&self.table).await
    }
}
