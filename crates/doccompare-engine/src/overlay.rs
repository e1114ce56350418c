//! Per-document overlay slot.
//!
//! Holds the published highlight set for one side. Sets are swapped whole,
//! so readers never observe a half-built one; `rebuild` serializes
//! recomputation for the side.

use std::sync::{Arc, PoisonError, RwLock};

use doccompare_core::correlate::HighlightSet;
use doccompare_core::model::DocumentSide;

pub(crate) struct SideOverlay {
    side: DocumentSide,
    set: RwLock<Arc<HighlightSet>>,
    /// Held for the whole of a rebuild, across awaits
    pub(crate) rebuild: tokio::sync::Mutex<()>,
}

impl SideOverlay {
    pub(crate) fn new(side: DocumentSide) -> Self {
        Self {
            side,
            set: RwLock::new(Arc::new(HighlightSet::empty(side))),
            rebuild: tokio::sync::Mutex::new(()),
        }
    }

    pub(crate) fn current(&self) -> Arc<HighlightSet> {
        Arc::clone(&self.set.read().unwrap_or_else(PoisonError::into_inner))
    }

    /// Publish `next`, returning the set it replaced
    pub(crate) fn replace(&self, next: HighlightSet) -> Arc<HighlightSet> {
        let mut guard = self.set.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *guard, Arc::new(next))
    }

    /// Drop the highlights of a finished comparison
    pub(crate) fn clear(&self) {
        self.replace(HighlightSet::empty(self.side));
    }
}
