//! Link Outcomes
//!
//! Expected results of link operations. Rejections and missing records are
//! values the caller branches on; only infrastructure failures travel as
//! [`Error`](crate::error::Error).

use std::fmt;

use thiserror::Error;

use crate::domain::{ExerciseId, ExerciseLink, ExerciseLinkId, ExerciseLinkType};

// == Incompatible Reason ==
/// Why an exercise cannot take part in a link.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncompatibleReason {
    SourceIsRest,
    TargetIsRest,
    /// Warmup and cooldown links must point at a workout exercise
    TargetNotWorkout,
}

impl fmt::Display for IncompatibleReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            IncompatibleReason::SourceIsRest => "REST exercises cannot have links",
            IncompatibleReason::TargetIsRest => "REST exercises cannot be linked to",
            IncompatibleReason::TargetNotWorkout => "target exercise must be a WORKOUT exercise",
        };
        f.write_str(message)
    }
}

// == Link Violation ==
/// A broken link rule.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinkViolation {
    #[error("Source exercise id is required")]
    EmptySourceId,

    #[error("Target exercise id is required")]
    EmptyTargetId,

    #[error("Link id is required")]
    EmptyLinkId,

    #[error("An exercise cannot be linked to itself")]
    SelfLink,

    #[error("Invalid link type for direct creation: {0}")]
    InvalidLinkTypeForDirectCreation(ExerciseLinkType),

    #[error("Incompatible exercise type: {0}")]
    IncompatibleExerciseType(IncompatibleReason),

    #[error("A {link_type} link between these exercises already exists")]
    DuplicateLink { link_type: ExerciseLinkType },

    #[error("Maximum links exceeded: at most {max} {link_type} links per exercise")]
    MaximumLinksExceeded { link_type: ExerciseLinkType, max: usize },

    #[error("Display order must be non-negative, got {0}")]
    NegativeDisplayOrder(i32),

    #[error("Link {link_id} does not belong to exercise {exercise_id}")]
    LinkDoesNotBelongToExercise {
        link_id: ExerciseLinkId,
        exercise_id: ExerciseId,
    },
}

// == Missing ==
/// A record an operation needed but could not find.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Missing {
    #[error("Exercise {0} not found")]
    Exercise(ExerciseId),

    #[error("Link {0} not found")]
    Link(ExerciseLinkId),
}

// == Link Outcome ==
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkOutcome<T> {
    Success(T),
    NotFound(Vec<Missing>),
    Rejected(Vec<LinkViolation>),
}

impl<T> LinkOutcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, LinkOutcome::Success(_))
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, LinkOutcome::Rejected(_))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, LinkOutcome::NotFound(_))
    }

    /// Violations of a rejected outcome, empty otherwise.
    pub fn violations(&self) -> &[LinkViolation] {
        match self {
            LinkOutcome::Rejected(violations) => violations,
            _ => &[],
        }
    }

    /// Missing records of a not-found outcome, empty otherwise.
    pub fn missing(&self) -> &[Missing] {
        match self {
            LinkOutcome::NotFound(missing) => missing,
            _ => &[],
        }
    }

    pub fn into_success(self) -> Option<T> {
        match self {
            LinkOutcome::Success(value) => Some(value),
            _ => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> LinkOutcome<U> {
        match self {
            LinkOutcome::Success(value) => LinkOutcome::Success(f(value)),
            LinkOutcome::NotFound(missing) => LinkOutcome::NotFound(missing),
            LinkOutcome::Rejected(violations) => LinkOutcome::Rejected(violations),
        }
    }
}

// == Operation Results ==
/// Links written by a successful create.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedLinks {
    pub link: ExerciseLink,
    /// None when the reverse link already existed
    pub reverse: Option<ExerciseLink>,
}

/// Links removed by a successful delete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeletedLinks {
    pub link_id: ExerciseLinkId,
    pub reverse_ids: Vec<ExerciseLinkId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages() {
        assert_eq!(
            LinkViolation::InvalidLinkTypeForDirectCreation(ExerciseLinkType::Workout).to_string(),
            "Invalid link type for direct creation: WORKOUT"
        );
        assert_eq!(
            LinkViolation::MaximumLinksExceeded {
                link_type: ExerciseLinkType::Warmup,
                max: 10
            }
            .to_string(),
            "Maximum links exceeded: at most 10 WARMUP links per exercise"
        );
        assert_eq!(
            LinkViolation::IncompatibleExerciseType(IncompatibleReason::SourceIsRest).to_string(),
            "Incompatible exercise type: REST exercises cannot have links"
        );
    }

    #[test]
    fn test_outcome_accessors() {
        let rejected: LinkOutcome<()> = LinkOutcome::Rejected(vec![LinkViolation::SelfLink]);
        assert!(rejected.is_rejected());
        assert_eq!(rejected.violations(), &[LinkViolation::SelfLink]);
        assert!(rejected.missing().is_empty());
        assert_eq!(rejected.into_success(), None);

        let missing = ExerciseId::new();
        let not_found: LinkOutcome<()> = LinkOutcome::NotFound(vec![Missing::Exercise(missing)]);
        assert!(not_found.is_not_found());
        assert_eq!(not_found.missing(), &[Missing::Exercise(missing)]);

        let success = LinkOutcome::Success(2).map(|n| n * 2);
        assert_eq!(success, LinkOutcome::Success(4));
    }
}
