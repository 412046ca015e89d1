//! Reference Module
//!
//! Cached access to reference tables.

mod service;
mod source;

pub use service::ReferenceTableService;
pub use source::{InMemoryReferenceSource, ReferenceDataSource};
