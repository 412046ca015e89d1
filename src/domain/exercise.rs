//! Exercise Model
//!
//! The slice of an exercise the linking rules need, plus the cross-field
//! validation applied to exercise candidates before they are stored.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ids::ExerciseId;

// == Exercise Kind ==
/// Exercise type reference values. An exercise may carry several.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ExerciseKind {
    Warmup,
    Workout,
    Cooldown,
    Rest,
}

// == Exercise Type Info ==
/// What the link engine learns about an exercise from persistence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseTypeInfo {
    pub exercise_id: ExerciseId,
    pub kinds: Vec<ExerciseKind>,
    pub is_active: bool,
}

impl ExerciseTypeInfo {
    pub fn new(exercise_id: ExerciseId, kinds: Vec<ExerciseKind>) -> Self {
        Self {
            exercise_id,
            kinds,
            is_active: true,
        }
    }

    pub fn is_rest(&self) -> bool {
        self.has_kind(ExerciseKind::Rest)
    }

    pub fn is_workout(&self) -> bool {
        self.has_kind(ExerciseKind::Workout)
    }

    pub fn has_kind(&self, kind: ExerciseKind) -> bool {
        self.kinds.contains(&kind)
    }
}

// == Exercise ==
/// An exercise candidate as submitted for create or update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exercise {
    pub id: ExerciseId,
    pub name: String,
    pub description: String,
    pub kinds: Vec<ExerciseKind>,
    pub muscle_groups: Vec<String>,
    pub kinetic_chain: Option<String>,
    pub weight_type: Option<String>,
}

impl Exercise {
    pub fn is_rest(&self) -> bool {
        self.kinds.contains(&ExerciseKind::Rest)
    }

    /// Projection used by the link engine.
    pub fn type_info(&self) -> ExerciseTypeInfo {
        ExerciseTypeInfo::new(self.id, self.kinds.clone())
    }
}

// == Exercise Violation ==
/// A broken exercise rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExerciseViolation {
    #[error("Exercise name is required")]
    NameRequired,

    #[error("REST exercises cannot have other exercise types")]
    RestNotExclusive,

    #[error("At least one muscle group must be specified for non-REST exercises")]
    MuscleGroupsRequired,

    #[error("REST exercises cannot have muscle groups")]
    RestWithMuscleGroups,

    #[error("Kinetic chain is required for non-REST exercises")]
    KineticChainRequired,

    #[error("REST exercises cannot have a kinetic chain")]
    RestWithKineticChain,
}

/// Checks every exercise rule and returns all violations, in rule order.
///
/// An exercise with no kinds at all is treated as non-REST.
pub fn validate_exercise(exercise: &Exercise) -> Vec<ExerciseViolation> {
    let mut violations = Vec::new();

    if exercise.name.trim().is_empty() {
        violations.push(ExerciseViolation::NameRequired);
    }

    let is_rest = exercise.is_rest();

    if is_rest && exercise.kinds.len() > 1 {
        violations.push(ExerciseViolation::RestNotExclusive);
    }

    match (is_rest, exercise.muscle_groups.is_empty()) {
        (false, true) => violations.push(ExerciseViolation::MuscleGroupsRequired),
        (true, false) => violations.push(ExerciseViolation::RestWithMuscleGroups),
        _ => {}
    }

    match (is_rest, exercise.kinetic_chain.is_some()) {
        (false, false) => violations.push(ExerciseViolation::KineticChainRequired),
        (true, true) => violations.push(ExerciseViolation::RestWithKineticChain),
        _ => {}
    }

    violations
}
