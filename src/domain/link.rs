//! Exercise Link Model
//!
//! A directed relationship between two exercises. Links are always stored in
//! pairs: the link a user asked for and the reverse link derived from it.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::ids::{ExerciseId, ExerciseLinkId};

// == Link Type ==
/// Relationship kind. Discriminants match the persisted integer values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExerciseLinkType {
    Warmup = 0,
    Cooldown = 1,
    Workout = 2,
    Alternative = 3,
}

impl ExerciseLinkType {
    /// WORKOUT links only ever exist as the reverse of a warmup or cooldown.
    pub fn is_direct_creatable(self) -> bool {
        !matches!(self, ExerciseLinkType::Workout)
    }

    /// Types the paired link may carry, pointing back at this link's source.
    pub fn reverse_types(self) -> &'static [ExerciseLinkType] {
        match self {
            ExerciseLinkType::Warmup | ExerciseLinkType::Cooldown => &[ExerciseLinkType::Workout],
            ExerciseLinkType::Workout => &[ExerciseLinkType::Warmup, ExerciseLinkType::Cooldown],
            ExerciseLinkType::Alternative => &[ExerciseLinkType::Alternative],
        }
    }

    /// Type minted for the reverse link on creation, if this type may be created directly.
    pub fn minted_reverse(self) -> Option<ExerciseLinkType> {
        match self {
            ExerciseLinkType::Warmup | ExerciseLinkType::Cooldown => Some(ExerciseLinkType::Workout),
            ExerciseLinkType::Alternative => Some(ExerciseLinkType::Alternative),
            ExerciseLinkType::Workout => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ExerciseLinkType::Warmup => "WARMUP",
            ExerciseLinkType::Cooldown => "COOLDOWN",
            ExerciseLinkType::Workout => "WORKOUT",
            ExerciseLinkType::Alternative => "ALTERNATIVE",
        }
    }
}

impl fmt::Display for ExerciseLinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Exercise Link ==
/// A persisted directed link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseLink {
    pub id: ExerciseLinkId,
    pub source_exercise_id: ExerciseId,
    pub target_exercise_id: ExerciseId,
    pub link_type: ExerciseLinkType,
    /// Position among same-type links from the same source, starting at 1
    pub display_order: i32,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExerciseLink {
    /// Creates a new active link with a fresh id.
    pub fn new(
        source_exercise_id: ExerciseId,
        target_exercise_id: ExerciseId,
        link_type: ExerciseLinkType,
        display_order: i32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: ExerciseLinkId::new(),
            source_exercise_id,
            target_exercise_id,
            link_type,
            display_order,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// The "no link" sentinel.
    pub fn empty() -> Self {
        Self {
            id: ExerciseLinkId::empty(),
            source_exercise_id: ExerciseId::empty(),
            target_exercise_id: ExerciseId::empty(),
            link_type: ExerciseLinkType::Warmup,
            display_order: 0,
            is_active: false,
            created_at: DateTime::<Utc>::MIN_UTC,
            updated_at: DateTime::<Utc>::MIN_UTC,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }

    /// True if `other` runs in the opposite direction with a pairable type.
    pub fn is_reverse_of(&self, other: &ExerciseLink) -> bool {
        self.source_exercise_id == other.target_exercise_id
            && self.target_exercise_id == other.source_exercise_id
            && other.link_type.reverse_types().contains(&self.link_type)
    }
}
