//! Change records, statistics and the comparison result that owns them.

use chrono::{DateTime, Utc};
use doccompare_core_types::{ChangeId, ComparisonId};
use serde::{Deserialize, Serialize};

use super::document::{DocumentKind, DocumentSide};

/// Kind of a change record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeKind {
    /// Text present only in the updated document
    Addition,
    /// Text present only in the original document
    Deletion,
}

impl ChangeKind {
    /// The document whose rendered layout shows this kind of change
    pub fn side(&self) -> DocumentSide {
        match self {
            ChangeKind::Addition => DocumentSide::Updated,
            ChangeKind::Deletion => DocumentSide::Original,
        }
    }

    /// Short label used in change lists
    pub fn label(&self) -> &'static str {
        match self {
            ChangeKind::Addition => "+ Added",
            ChangeKind::Deletion => "\u{2212} Removed",
        }
    }
}

/// Unchanged text immediately around a change.
///
/// Each side is bounded by the chunker's context budget and is empty at the
/// start or end of the document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeContext {
    pub before: String,
    pub after: String,
}

impl std::fmt::Display for ChangeContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\u{2026}{}", self.before, self.after)
    }
}

/// A coalesced, human-scannable insertion or deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeRecord {
    pub id: ChangeId,
    pub kind: ChangeKind,
    /// Trimmed literal payload; never empty
    pub text: String,
    pub context: ChangeContext,
    /// Char offset into the concatenated edit script when the record was opened
    pub position: usize,
}

/// Aggregate character statistics for one comparison.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// Chars carried by Insert steps
    pub additions: usize,
    /// Chars carried by Delete steps
    pub deletions: usize,
    /// Chars carried by Equal steps
    pub unchanged: usize,
    /// Number of change records
    pub total_changes: usize,
}

impl Stats {
    /// Sum of all edit-script payload lengths
    pub fn total_chars(&self) -> usize {
        self.additions + self.deletions + self.unchanged
    }
}

/// Identity of one compared document, echoed back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentSummary {
    pub name: String,
    pub kind: DocumentKind,
    /// Length of the extracted text in chars
    pub char_count: usize,
}

/// Outcome of one successful comparison.
///
/// Built once, then shared read-only (behind an `Arc`) by every observer.
/// A new comparison replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonResult {
    pub id: ComparisonId,
    pub created_at: DateTime<Utc>,
    pub original: DocumentSummary,
    pub updated: DocumentSummary,
    pub stats: Stats,
    /// Change records in document order
    pub changes: Vec<ChangeRecord>,
}

impl ComparisonResult {
    /// Look up a change record by id
    pub fn change(&self, id: &ChangeId) -> Option<&ChangeRecord> {
        self.changes.iter().find(|c| &c.id == id)
    }

    pub fn changes_of(&self, kind: ChangeKind) -> impl Iterator<Item = &ChangeRecord> {
        self.changes.iter().filter(move |c| c.kind == kind)
    }

    /// Change records whose highlights belong on the given document
    pub fn changes_for(&self, side: DocumentSide) -> impl Iterator<Item = &ChangeRecord> {
        self.changes.iter().filter(move |c| c.kind.side() == side)
    }

    /// Summary of the document on the given side
    pub fn document(&self, side: DocumentSide) -> &DocumentSummary {
        match side {
            DocumentSide::Original => &self.original,
            DocumentSide::Updated => &self.updated,
        }
    }

    /// True when the two documents produced no change records
    pub fn is_unchanged(&self) -> bool {
        self.changes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_routes_to_side() {
        assert_eq!(ChangeKind::Addition.side(), DocumentSide::Updated);
        assert_eq!(ChangeKind::Deletion.side(), DocumentSide::Original);
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&ChangeKind::Addition).unwrap(),
            "\"addition\""
        );
        assert_eq!(
            serde_json::to_string(&ChangeKind::Deletion).unwrap(),
            "\"deletion\""
        );
    }

    #[test]
    fn test_stats_total_chars() {
        let stats = Stats {
            additions: 3,
            deletions: 4,
            unchanged: 10,
            total_changes: 2,
        };
        assert_eq!(stats.total_chars(), 17);
    }
}
