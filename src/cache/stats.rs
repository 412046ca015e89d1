//! Store Statistics
//!
//! Counters kept by the in-memory store, readable as a snapshot.

use serde::Serialize;

// == Store Event ==
/// Something the store counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEvent {
    Hit,
    Miss,
    /// A read found the entry past its TTL
    Expired,
    /// Capacity pressure pushed out the least recently used entry
    Evicted,
    /// Explicit removal, by key or by prefix
    Invalidated,
}

// == Store Stats ==
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub hits: u64,
    /// Includes reads of expired entries
    pub misses: u64,
    pub expirations: u64,
    pub evictions: u64,
    pub invalidations: u64,
    pub entries: usize,
}

impl StoreStats {
    pub fn record(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Hit => self.hits += 1,
            StoreEvent::Miss => self.misses += 1,
            StoreEvent::Expired => {
                self.expirations += 1;
                self.misses += 1;
            }
            StoreEvent::Evicted => self.evictions += 1,
            StoreEvent::Invalidated => self.invalidations += 1,
        }
    }

    /// hits / (hits + misses), or 0.0 before any read.
    pub fn hit_rate(&self) -> f64 {
        let reads = self.hits + self.misses;
        if reads == 0 {
            0.0
        } else {
            self.hits as f64 / reads as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expired_counts_as_miss() {
        let mut stats = StoreStats::default();
        stats.record(StoreEvent::Hit);
        stats.record(StoreEvent::Expired);

        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.expirations, 1);
        assert!((stats.hit_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_hit_rate_without_reads() {
        assert_eq!(StoreStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_eviction_and_invalidation_counters() {
        let mut stats = StoreStats::default();
        stats.record(StoreEvent::Evicted);
        stats.record(StoreEvent::Invalidated);
        stats.record(StoreEvent::Invalidated);

        assert_eq!(stats.evictions, 1);
        assert_eq!(stats.invalidations, 2);
        assert_eq!(stats.hits + stats.misses, 0);
    }
}
