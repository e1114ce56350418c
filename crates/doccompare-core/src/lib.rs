//! DocCompare Core - document comparison kernel
//!
//! This crate provides the pure building blocks of a two-document
//! comparison:
//! - Domain model (edit scripts, change records, fragments, highlights)
//! - Character diff with semantic cleanup
//! - Change chunking with context and statistics
//! - Highlight correlation against rendered layouts
//! - Text extraction contract and format dispatch
//! - Error facility, logging facility and layered configuration
//!
//! Nothing here performs I/O besides configuration loading; orchestration
//! lives in `doccompare-engine`.

pub mod chunk;
pub mod compare;
pub mod config;
pub mod correlate;
pub mod diff;
pub mod errors;
pub mod extract;
pub mod logging_facility;
pub mod model;

// Macros expand to `$crate::core_types::...`
pub use doccompare_core_types as core_types;

// Re-export commonly used types
pub use chunk::chunk;
pub use compare::compare_texts;
pub use config::CompareConfig;
pub use correlate::{correlate, HighlightSet, OverlayDelta};
pub use diff::{diff, diff_with};
pub use errors::{DocCompareError, ExError, ExErrorKind, Result};
pub use extract::{ExtractorRegistry, FormatBackend, PlainTextBackend, TextExtractor};
pub use model::{
    ChangeKind, ChangeRecord, ComparisonResult, DocumentInput, DocumentSide, EditOp, Highlight,
    Stats, TextFragment,
};
