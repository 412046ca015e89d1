//! Fitter Core - exercise linking and reference-data caching
//!
//! Enforces the bidirectional link rules between exercises and caches
//! reference tables with table-specific expiry.

pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod links;
pub mod logging;
pub mod reference;

pub use cache::{CacheDurationPolicy, CacheResult, KeyValueStore, MemoryStore, ReferenceDataCache};
pub use config::Config;
pub use error::{Error, Result};
pub use links::{ExerciseLinkEngine, InMemoryLinkStore, LinkDataService, LinkOutcome, LinkViolation};
pub use reference::{InMemoryReferenceSource, ReferenceDataSource, ReferenceTableService};
