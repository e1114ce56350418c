//! DocCompare Engine - comparison orchestration
//!
//! Drives the kernel in `doccompare-core` for one user-facing comparison at
//! a time: concurrent extraction, diffing off the async executor, and
//! per-document highlight overlays kept in step with the renderer.

mod overlay;
pub mod session;
pub mod state;

pub use session::{ComparisonSession, SelectionDelta};
pub use state::{LayoutOutcome, SessionState};
