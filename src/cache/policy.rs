//! Cache Duration Policy
//!
//! Picks the TTL for a reference table from its static/dynamic classification.

use std::collections::HashSet;
use std::time::Duration;

use crate::config::CacheConfig;

// == Table Class ==
/// How often a table is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableClass {
    Static,
    Dynamic,
}

// == Cache Duration Policy ==
/// Immutable table → TTL mapping built from [`CacheConfig`].
#[derive(Debug, Clone)]
pub struct CacheDurationPolicy {
    static_tables: HashSet<String>,
    dynamic_tables: HashSet<String>,
    static_duration: Duration,
    dynamic_duration: Duration,
}

impl CacheDurationPolicy {
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            static_tables: config.static_tables.tables.iter().cloned().collect(),
            dynamic_tables: config.dynamic_tables.tables.iter().cloned().collect(),
            static_duration: config.static_tables.duration(),
            dynamic_duration: config.dynamic_tables.duration(),
        }
    }

    /// Classification of a configured table, `None` when the table is unknown.
    ///
    /// Matching is case-sensitive.
    pub fn classify(&self, table: &str) -> Option<TableClass> {
        if self.static_tables.contains(table) {
            Some(TableClass::Static)
        } else if self.dynamic_tables.contains(table) {
            Some(TableClass::Dynamic)
        } else {
            None
        }
    }

    /// TTL for entries of `table`. Unknown tables get the dynamic (shorter) TTL.
    pub fn cache_duration(&self, table: &str) -> Duration {
        match self.classify(table) {
            Some(TableClass::Static) => self.static_duration,
            Some(TableClass::Dynamic) | None => self.dynamic_duration,
        }
    }
}

impl Default for CacheDurationPolicy {
    fn default() -> Self {
        Self::new(&CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TableCacheConfig;

    fn policy() -> CacheDurationPolicy {
        CacheDurationPolicy::new(&CacheConfig {
            static_tables: TableCacheConfig::new(24, &["BodyParts", "DifficultyLevels"]),
            dynamic_tables: TableCacheConfig::new(1, &["Equipment"]),
            max_entries: 100,
        })
    }

    #[test]
    fn test_static_table_duration() {
        assert_eq!(policy().cache_duration("BodyParts"), Duration::from_secs(24 * 3600));
        assert_eq!(policy().classify("DifficultyLevels"), Some(TableClass::Static));
    }

    #[test]
    fn test_dynamic_table_duration() {
        assert_eq!(policy().cache_duration("Equipment"), Duration::from_secs(3600));
        assert_eq!(policy().classify("Equipment"), Some(TableClass::Dynamic));
    }

    #[test]
    fn test_unknown_table_gets_dynamic_duration() {
        let policy = policy();
        assert_eq!(policy.classify("Gyms"), None);
        assert_eq!(policy.cache_duration("Gyms"), Duration::from_secs(3600));
    }

    #[test]
    fn test_matching_is_case_sensitive() {
        let policy = policy();
        assert_eq!(policy.classify("bodyparts"), None);
        assert_eq!(policy.cache_duration("bodyparts"), Duration::from_secs(3600));
    }

    #[test]
    fn test_default_policy() {
        let policy = CacheDurationPolicy::default();
        assert_eq!(policy.classify("MuscleGroups"), Some(TableClass::Dynamic));
        assert_eq!(policy.classify("ExerciseTypes"), Some(TableClass::Static));
    }
}
