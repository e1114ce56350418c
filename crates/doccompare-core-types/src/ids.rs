//! Identifier newtypes for comparisons and change records
//!
//! A `ComparisonId` names one user-initiated comparison and is used by the
//! rendering side to tag layouts, so stale layouts can be recognised. A
//! `ChangeId` is the lookup key that ties a highlight back to its change
//! record; it is only unique within one comparison.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a single comparison run
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ComparisonId(String);

impl ComparisonId {
    /// Generate a new time-ordered ComparisonId using UUIDv7
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (for deserialization)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for ComparisonId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for ComparisonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of a change record, stable for identical inputs
///
/// Ids are derived from the record's emission ordinal, so running the same
/// comparison twice yields the same ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChangeId(String);

impl ChangeId {
    /// Build the id for the `ordinal`-th emitted change record
    pub fn from_ordinal(ordinal: usize) -> Self {
        Self(format!("change-{}", ordinal))
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (e.g. a selection coming back from a UI)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl std::fmt::Display for ChangeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_comparison_id_generation() {
        let id1 = ComparisonId::new();
        let id2 = ComparisonId::new();

        assert_ne!(id1, id2);
        assert!(!id1.as_str().is_empty());
    }

    #[test]
    fn test_comparison_id_display() {
        let id = ComparisonId::new();
        assert_eq!(format!("{}", id), id.as_str());
    }

    #[test]
    fn test_change_id_is_deterministic() {
        assert_eq!(ChangeId::from_ordinal(3), ChangeId::from_ordinal(3));
        assert_eq!(ChangeId::from_ordinal(3).as_str(), "change-3");
        assert_ne!(ChangeId::from_ordinal(3), ChangeId::from_ordinal(4));
    }

    #[test]
    fn test_change_id_serializes_as_plain_string() {
        let id = ChangeId::from_ordinal(7);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"change-7\"");

        let back: ChangeId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }
}
