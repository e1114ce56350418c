//! Character-level text diff.
//!
//! Computes an edit script between two document texts and post-processes it
//! into human-readable edit spans.
//!
//! ## Entry point
//!
//! ```
//! use doccompare_core::diff::diff;
//! use doccompare_core::model::EditOp;
//!
//! let ops = diff("The fee is $100.", "The fee is $150.");
//! assert!(ops.contains(&EditOp::Delete("100".into())));
//! assert!(ops.contains(&EditOp::Insert("150".into())));
//! ```
//!
//! ## Guarantees
//!
//! - **Reconstruction**: concatenating the `Equal` and `Delete` texts yields
//!   the original; `Equal` and `Insert` yields the updated text.
//! - **Identity**: equal inputs produce a single `Equal` (or nothing, for two
//!   empty strings).
//! - **Totality**: the diff never fails. If the time budget runs out the
//!   script gets coarser but stays valid.

pub mod cleanup;
pub mod engine;
pub mod human_summary;

pub use engine::{diff, diff_with};
pub use human_summary::render_human_summary;
