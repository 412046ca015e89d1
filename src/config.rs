//! Configuration Module
//!
//! Cache classification, cache durations and link limits. Loaded once at
//! process start (defaults, environment variables or JSON) and passed by value
//! into the components that need it; nothing reads it as global state.

use std::collections::HashSet;
use std::env;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::cache::keys;
use crate::error::{Error, Result};

const SECONDS_PER_HOUR: u64 = 60 * 60;

/// Tables whose content practically never changes once seeded.
const DEFAULT_STATIC_TABLES: &[&str] = &[
    "DifficultyLevels",
    "KineticChainTypes",
    "BodyParts",
    "MuscleRoles",
    "ExerciseTypes",
    "ExerciseWeightTypes",
    "MetricTypes",
    "MovementPatterns",
    "WorkoutCategories",
    "WorkoutObjectives",
    "ExecutionProtocols",
];

/// Tables editable through the admin surface.
const DEFAULT_DYNAMIC_TABLES: &[&str] = &["Equipment", "MuscleGroups"];

// == Table Cache Config ==
/// A set of tables sharing one cache duration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCacheConfig {
    /// Cache duration in hours
    pub duration_hours: u64,
    /// Table names, matched case-sensitively
    pub tables: Vec<String>,
}

impl TableCacheConfig {
    pub fn new(duration_hours: u64, tables: &[&str]) -> Self {
        Self {
            duration_hours,
            tables: tables.iter().map(|t| t.to_string()).collect(),
        }
    }

    /// Cache duration as a `Duration`.
    pub fn duration(&self) -> Duration {
        Duration::from_secs(self.duration_hours.saturating_mul(SECONDS_PER_HOUR))
    }
}

// == Cache Config ==
/// Reference-data cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Rarely-changing tables
    pub static_tables: TableCacheConfig,
    /// Tables that change through normal operation
    pub dynamic_tables: TableCacheConfig,
    /// Capacity of the in-memory key-value store
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            static_tables: TableCacheConfig::new(365 * 24, DEFAULT_STATIC_TABLES),
            dynamic_tables: TableCacheConfig::new(1, DEFAULT_DYNAMIC_TABLES),
            max_entries: 10_000,
        }
    }
}

// == Link Config ==
/// Exercise link limits.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkConfig {
    /// Maximum WARMUP (or COOLDOWN) links from a single exercise
    pub max_links_per_type: usize,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            max_links_per_type: 10,
        }
    }
}

// == Config ==
/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    pub cache: CacheConfig,
    pub links: LinkConfig,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `STATIC_TABLES` - Comma separated static table names
    /// - `STATIC_CACHE_HOURS` - Static table cache duration (default: 8760)
    /// - `DYNAMIC_TABLES` - Comma separated dynamic table names
    /// - `DYNAMIC_CACHE_HOURS` - Dynamic table cache duration (default: 1)
    /// - `CACHE_MAX_ENTRIES` - In-memory store capacity (default: 10000)
    /// - `MAX_LINKS_PER_TYPE` - Warmup/cooldown links per exercise (default: 10)
    ///
    /// Unparseable values fall back to the default. The result is validated.
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            cache: CacheConfig {
                static_tables: TableCacheConfig {
                    duration_hours: env_or(
                        "STATIC_CACHE_HOURS",
                        defaults.cache.static_tables.duration_hours,
                    ),
                    tables: env_tables("STATIC_TABLES")
                        .unwrap_or(defaults.cache.static_tables.tables),
                },
                dynamic_tables: TableCacheConfig {
                    duration_hours: env_or(
                        "DYNAMIC_CACHE_HOURS",
                        defaults.cache.dynamic_tables.duration_hours,
                    ),
                    tables: env_tables("DYNAMIC_TABLES")
                        .unwrap_or(defaults.cache.dynamic_tables.tables),
                },
                max_entries: env_or("CACHE_MAX_ENTRIES", defaults.cache.max_entries),
            },
            links: LinkConfig {
                max_links_per_type: env_or(
                    "MAX_LINKS_PER_TYPE",
                    defaults.links.max_links_per_type,
                ),
            },
        };

        config.validate()?;
        Ok(config)
    }

    /// Parses a JSON document into a validated Config.
    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Checks cross-field consistency.
    ///
    /// Static and dynamic table sets must be disjoint, the store needs room
    /// for at least one entry and at least one link per type must be allowed.
    pub fn validate(&self) -> Result<()> {
        let mut invalid: Vec<&str> = self
            .cache
            .static_tables
            .tables
            .iter()
            .chain(&self.cache.dynamic_tables.tables)
            .map(String::as_str)
            .filter(|t| !keys::is_valid_table_name(t))
            .collect();

        if !invalid.is_empty() {
            invalid.sort_unstable();
            return Err(Error::Config(format!(
                "Table names must be non-blank and free of '{}': {}",
                keys::KEY_SEPARATOR,
                invalid.join(", ")
            )));
        }

        let static_set: HashSet<&str> = self
            .cache
            .static_tables
            .tables
            .iter()
            .map(String::as_str)
            .collect();

        let mut overlap: Vec<&str> = self
            .cache
            .dynamic_tables
            .tables
            .iter()
            .map(String::as_str)
            .filter(|t| static_set.contains(t))
            .collect();

        if !overlap.is_empty() {
            overlap.sort_unstable();
            return Err(Error::Config(format!(
                "Tables classified as both static and dynamic: {}",
                overlap.join(", ")
            )));
        }

        if self.cache.max_entries == 0 {
            return Err(Error::Config(
                "Cache max_entries must be greater than zero".to_string(),
            ));
        }

        if self.links.max_links_per_type == 0 {
            return Err(Error::Config(
                "max_links_per_type must be greater than zero".to_string(),
            ));
        }

        Ok(())
    }
}

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

fn env_tables(name: &str) -> Option<Vec<String>> {
    env::var(name).ok().map(|raw| parse_table_list(&raw))
}

/// Splits a comma separated list, dropping blanks.
fn parse_table_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.links.max_links_per_type, 10);
        assert_eq!(config.cache.dynamic_tables.duration_hours, 1);
        assert_eq!(config.cache.static_tables.duration_hours, 8760);
        assert!(config
            .cache
            .dynamic_tables
            .tables
            .contains(&"Equipment".to_string()));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_table_duration() {
        let tables = TableCacheConfig::new(2, &["BodyParts"]);
        assert_eq!(tables.duration(), Duration::from_secs(7200));
    }

    #[test]
    fn test_validate_rejects_overlap() {
        let mut config = Config::default();
        config.cache.dynamic_tables.tables.push("BodyParts".to_string());

        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("BodyParts")));
    }

    #[test]
    fn test_validate_rejects_separator_in_table_name() {
        let mut config = Config::default();
        config.cache.dynamic_tables.tables.push("A:GetById".to_string());

        let err = config.validate().unwrap_err();
        assert!(matches!(err, Error::Config(msg) if msg.contains("A:GetById")));
    }

    #[test]
    fn test_validate_rejects_zero_limits() {
        let mut config = Config::default();
        config.links.max_links_per_type = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.cache.max_entries = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_table_list() {
        assert_eq!(
            parse_table_list(" Equipment, ,MuscleGroups ,"),
            vec!["Equipment".to_string(), "MuscleGroups".to_string()]
        );
        assert!(parse_table_list("").is_empty());
    }

    #[test]
    fn test_from_json() {
        let raw = r#"{
            "cache": {
                "static_tables": { "duration_hours": 24, "tables": ["BodyParts"] },
                "dynamic_tables": { "duration_hours": 2, "tables": ["Equipment"] },
                "max_entries": 50
            },
            "links": { "max_links_per_type": 3 }
        }"#;

        let config = Config::from_json(raw).unwrap();
        assert_eq!(config.cache.max_entries, 50);
        assert_eq!(config.links.max_links_per_type, 3);
        assert_eq!(config.cache.static_tables.tables, vec!["BodyParts".to_string()]);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        assert!(matches!(
            Config::from_json("{ nope"),
            Err(Error::Serialization(_))
        ));
    }

    #[test]
    fn test_config_from_env() {
        env::set_var("DYNAMIC_TABLES", "Equipment,Gyms");
        env::set_var("DYNAMIC_CACHE_HOURS", "3");
        env::set_var("MAX_LINKS_PER_TYPE", "not-a-number");

        let config = Config::from_env().unwrap();

        env::remove_var("DYNAMIC_TABLES");
        env::remove_var("DYNAMIC_CACHE_HOURS");
        env::remove_var("MAX_LINKS_PER_TYPE");

        assert_eq!(
            config.cache.dynamic_tables.tables,
            vec!["Equipment".to_string(), "Gyms".to_string()]
        );
        assert_eq!(config.cache.dynamic_tables.duration_hours, 3);
        assert_eq!(config.links.max_links_per_type, 10);
    }
}
