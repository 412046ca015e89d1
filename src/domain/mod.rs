//! Domain Module
//!
//! Entities shared by the link engine and the reference-data cache.

pub mod exercise;
pub mod ids;
pub mod link;
pub mod reference;

pub use exercise::{validate_exercise, Exercise, ExerciseKind, ExerciseTypeInfo, ExerciseViolation};
pub use ids::{ExerciseId, ExerciseLinkId};
pub use link::{ExerciseLink, ExerciseLinkType};
pub use reference::{EmptyAware, ReferenceDataEntry};
