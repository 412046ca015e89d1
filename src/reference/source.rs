//! Reference Data Source
//!
//! Where reference tables are read from when the cache misses.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::ReferenceDataEntry;
use crate::error::Result;

#[async_trait]
pub trait ReferenceDataSource: Send + Sync {
    /// Active entries of `table`, by display order.
    async fn load_all(&self, table: &str) -> Result<Vec<ReferenceDataEntry>>;

    async fn load_by_id(&self, table: &str, id: &str) -> Result<Option<ReferenceDataEntry>>;

    /// Case-insensitive lookup by value.
    async fn load_by_value(&self, table: &str, value: &str) -> Result<Option<ReferenceDataEntry>>;
}

// == In-Memory Reference Source ==
/// Reference tables held in memory, seeded by the host.
#[derive(Debug, Default)]
pub struct InMemoryReferenceSource {
    tables: RwLock<HashMap<String, Vec<ReferenceDataEntry>>>,
    loads: AtomicUsize,
}

impl InMemoryReferenceSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the content of `table`.
    pub async fn seed(&self, table: &str, entries: Vec<ReferenceDataEntry>) {
        self.tables.write().await.insert(table.to_string(), entries);
    }

    /// Adds or replaces one entry, matched by id.
    pub async fn upsert(&self, table: &str, entry: ReferenceDataEntry) {
        let mut tables = self.tables.write().await;
        let entries = tables.entry(table.to_string()).or_default();
        match entries.iter_mut().find(|existing| existing.id == entry.id) {
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
    }

    /// Number of loads served so far.
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }

    async fn find<P>(&self, table: &str, predicate: P) -> Option<ReferenceDataEntry>
    where
        P: Fn(&ReferenceDataEntry) -> bool,
    {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.read().await;
        tables
            .get(table)?
            .iter()
            .find(|entry| entry.is_active && predicate(entry))
            .cloned()
    }
}

#[async_trait]
impl ReferenceDataSource for InMemoryReferenceSource {
    async fn load_all(&self, table: &str) -> Result<Vec<ReferenceDataEntry>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        let tables = self.tables.read().await;
        let mut entries: Vec<ReferenceDataEntry> = tables
            .get(table)
            .map(|entries| entries.iter().filter(|e| e.is_active).cloned().collect())
            .unwrap_or_default();
        entries.sort_by_key(|entry| entry.display_order);
        Ok(entries)
    }

    async fn load_by_id(&self, table: &str, id: &str) -> Result<Option<ReferenceDataEntry>> {
        Ok(self.find(table, |entry| entry.id == id).await)
    }

    async fn load_by_value(&self, table: &str, value: &str) -> Result<Option<ReferenceDataEntry>> {
        let wanted = value.to_lowercase();
        Ok(self
            .find(table, |entry| entry.value.to_lowercase() == wanted)
            .await)
    }
}
