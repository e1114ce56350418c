//! Domain model for document comparison.

pub mod change;
pub mod document;
pub mod edit;
pub mod layout;

pub use change::{ChangeContext, ChangeKind, ChangeRecord, ComparisonResult, DocumentSummary, Stats};
pub use document::{DocumentInput, DocumentKind, DocumentSide, ExtractedText};
pub use edit::EditOp;
pub use layout::{Emphasis, Highlight, Rect, TextFragment};
