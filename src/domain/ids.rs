//! Typed Identifiers
//!
//! Each entity gets its own id type wrapping a uuid, so an exercise id can
//! never be passed where a link id is expected. The string form is
//! `"{prefix}-{uuid}"`; anything else parses to the empty id.

use uuid::fmt::Hyphenated;
use uuid::Uuid;

const HYPHENATED_LEN: usize = Hyphenated::LENGTH;

/// Declares a prefixed uuid identifier type.
///
/// Generated API: `new`, `empty`, `is_empty`, `from_uuid`, `as_uuid`,
/// `parse_or_empty`, `PREFIX`, `Display`, `From<String>`, `Into<String>` and
/// serde through the string form.
macro_rules! typed_id {
    ($(#[$meta:meta])* $name:ident => $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
        #[derive(serde::Serialize, serde::Deserialize)]
        #[serde(into = "String", from = "String")]
        pub struct $name(Uuid);

        impl $name {
            /// String prefix preceding the uuid
            pub const PREFIX: &'static str = $prefix;

            /// Mints a fresh random id.
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// The "no value" sentinel.
            pub const fn empty() -> Self {
                Self(Uuid::nil())
            }

            pub fn is_empty(&self) -> bool {
                self.0.is_nil()
            }

            pub const fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }

            pub fn as_uuid(&self) -> Uuid {
                self.0
            }

            /// Parses `"{prefix}-{uuid}"`, returning the empty id on any mismatch.
            ///
            /// Only the hyphenated uuid form is accepted, so parsing and
            /// `Display` round-trip.
            pub fn parse_or_empty(raw: &str) -> Self {
                raw.strip_prefix(Self::PREFIX)
                    .and_then(|rest| rest.strip_prefix('-'))
                    .filter(|uuid| uuid.len() == HYPHENATED_LEN)
                    .and_then(|uuid| Uuid::parse_str(uuid).ok())
                    .map(Self)
                    .unwrap_or_else(Self::empty)
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}-{}", Self::PREFIX, self.0)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self::parse_or_empty(&raw)
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.to_string()
            }
        }
    };
}

typed_id!(
    /// Identifies an exercise.
    ExerciseId => "exercise"
);

typed_id!(
    /// Identifies a link between two exercises.
    ExerciseLinkId => "exerciselink"
);
