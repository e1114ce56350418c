//! Session lifecycle states and event outcomes.

use doccompare_core::correlate::OverlayDelta;
use doccompare_core::model::DocumentSide;
use serde::Serialize;

/// Where a [`ComparisonSession`](crate::ComparisonSession) is in its
/// lifecycle
///
/// `Idle → Extracting → Diffing → Correlating → Ready`. A failure during
/// extraction or diffing moves to `Errored`, which only a new comparison
/// leaves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    #[default]
    Idle,
    Extracting,
    Diffing,
    Correlating,
    Ready,
    Errored {
        /// The document that caused the failure, when one did
        side: Option<DocumentSide>,
        message: String,
    },
}

impl SessionState {
    pub fn name(&self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Extracting => "extracting",
            SessionState::Diffing => "diffing",
            SessionState::Correlating => "correlating",
            SessionState::Ready => "ready",
            SessionState::Errored { .. } => "errored",
        }
    }

    /// True while a comparison is running
    pub fn is_busy(&self) -> bool {
        matches!(
            self,
            SessionState::Extracting | SessionState::Diffing | SessionState::Correlating
        )
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SessionState::Ready)
    }
}

impl std::fmt::Display for SessionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionState::Errored {
                side: Some(side),
                message,
            } => write!(f, "errored ({}): {}", side, message),
            SessionState::Errored { side: None, message } => write!(f, "errored: {}", message),
            other => f.write_str(other.name()),
        }
    }
}

/// Result of handing a layout to the session
#[derive(Debug, Clone, PartialEq)]
pub enum LayoutOutcome {
    /// The layout belonged to a comparison that is no longer current
    Ignored,
    /// The side's highlights were rebuilt; the delta says what to redraw
    Applied(OverlayDelta),
}

impl LayoutOutcome {
    pub fn is_applied(&self) -> bool {
        matches!(self, LayoutOutcome::Applied(_))
    }
}
