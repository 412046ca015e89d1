//! Links Module
//!
//! Bidirectional exercise links: the engine enforcing pairing and limit rules,
//! the persistence interface it drives, and an in-memory implementation.

mod data;
mod engine;
mod memory;
mod outcome;

pub use data::LinkDataService;
pub use engine::ExerciseLinkEngine;
pub use memory::InMemoryLinkStore;
pub use outcome::{CreatedLinks, DeletedLinks, IncompatibleReason, LinkOutcome, LinkViolation, Missing};
