//! Reference Data Entries
//!
//! Lookup records (difficulty levels, body parts, equipment...) shared by all
//! reference tables.

use serde::{Deserialize, Serialize};

// == Reference Data Entry ==
/// A named, described, stable-id lookup record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceDataEntry {
    /// Stable string id, e.g. "bodypart-7c5a2d6e-..."
    pub id: String,
    pub value: String,
    pub description: String,
    pub display_order: i32,
    pub is_active: bool,
}

impl ReferenceDataEntry {
    pub fn new(id: impl Into<String>, value: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
            description: description.into(),
            display_order: 0,
            is_active: true,
        }
    }

    pub fn with_display_order(mut self, display_order: i32) -> Self {
        self.display_order = display_order;
        self
    }

    /// The "no entry" sentinel.
    pub fn empty() -> Self {
        Self {
            id: String::new(),
            value: String::new(),
            description: String::new(),
            display_order: 0,
            is_active: false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.id.is_empty()
    }
}

// == Empty Aware ==
/// Values with a sentinel "empty" state that should not be cached.
pub trait EmptyAware {
    fn is_empty_value(&self) -> bool;
}

impl EmptyAware for ReferenceDataEntry {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

impl<T> EmptyAware for Vec<T> {
    fn is_empty_value(&self) -> bool {
        self.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_entry() {
        let entry = ReferenceDataEntry::empty();
        assert!(entry.is_empty());
        assert!(entry.is_empty_value());
    }

    #[test]
    fn test_new_entry() {
        let entry = ReferenceDataEntry::new("bodypart-1", "Chest", "Chest muscles").with_display_order(3);
        assert!(!entry.is_empty());
        assert!(entry.is_active);
        assert_eq!(entry.display_order, 3);
    }

    #[test]
    fn test_vec_emptiness() {
        let entries: Vec<ReferenceDataEntry> = Vec::new();
        assert!(entries.is_empty_value());
        assert!(!vec![ReferenceDataEntry::new("a", "b", "c")].is_empty_value());
    }
}
