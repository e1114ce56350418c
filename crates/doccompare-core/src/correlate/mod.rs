//! Highlight correlation.
//!
//! Maps change records onto the positioned text fragments a renderer
//! produced for one document.
//!
//! ## Entry points
//!
//! - [`correlate`] matches one change against one layout.
//! - [`HighlightSet::build`] matches every change of a document and keys the
//!   highlights by change id.
//! - [`parse_layout_json`] decodes a layout handed over as JSON.
//!
//! Correlation is best-effort and never fails: a change the matcher cannot
//! place simply has no highlights.

pub mod matcher;
pub mod overlay;

pub use matcher::correlate;
pub use overlay::{HighlightSet, OverlayDelta};

use crate::errors::{DocCompareError, Result};
use crate::model::TextFragment;

/// Decode a JSON array of text fragments
///
/// # Errors
///
/// `InvalidLayout` if the JSON does not describe fragments, or a fragment
/// has a non-finite coordinate or a negative size.
pub fn parse_layout_json(json: &str) -> Result<Vec<TextFragment>> {
    let fragments: Vec<TextFragment> =
        serde_json::from_str(json).map_err(|e| DocCompareError::InvalidLayout {
            reason: e.to_string(),
        })?;

    for (idx, fragment) in fragments.iter().enumerate() {
        let r = &fragment.rect;
        let finite = [r.x, r.y, r.width, r.height].iter().all(|v| v.is_finite());
        if !finite || r.width < 0.0 || r.height < 0.0 {
            return Err(DocCompareError::InvalidLayout {
                reason: format!("fragment {} has an invalid rectangle", idx),
            });
        }
    }

    Ok(fragments)
}
