//! Rendered-layout input and highlight output.

use doccompare_core_types::ChangeId;
use serde::{Deserialize, Serialize};

use super::change::ChangeKind;

/// Position and size in rendering coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

/// One positioned run of rendered text, as emitted by the page renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextFragment {
    /// Zero-based page index
    pub page: u32,
    pub rect: Rect,
    pub text: String,
}

impl TextFragment {
    pub fn new(page: u32, rect: Rect, text: impl Into<String>) -> Self {
        Self {
            page,
            rect,
            text: text.into(),
        }
    }
}

/// Visual emphasis of a highlight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Emphasis {
    #[default]
    Dimmed,
    Selected,
}

impl Emphasis {
    /// Overlay opacity the renderer should use
    pub fn opacity(&self) -> f32 {
        match self {
            Emphasis::Dimmed => 0.3,
            Emphasis::Selected => 0.6,
        }
    }
}

/// An overlay rectangle correlated to one change record.
///
/// Geometry is fixed for the lifetime of a highlight; only `emphasis`
/// changes, on selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Highlight {
    /// Lookup key of the owning change record
    pub change_id: ChangeId,
    pub kind: ChangeKind,
    pub page: u32,
    pub rect: Rect,
    /// Index of the matched fragment in the layout it was computed from
    pub fragment_index: usize,
    #[serde(default)]
    pub emphasis: Emphasis,
}

impl Highlight {
    /// Identity of the overlay element, ignoring emphasis
    pub fn key(&self) -> (&ChangeId, usize) {
        (&self.change_id, self.fragment_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_is_brighter_than_dimmed() {
        assert!(Emphasis::Selected.opacity() > Emphasis::Dimmed.opacity());
    }

    #[test]
    fn test_fragment_layout_json() {
        let json = r#"[{"page":0,"rect":{"x":1.0,"y":2.0,"width":3.0,"height":4.0},"text":"fee"}]"#;
        let fragments: Vec<TextFragment> = serde_json::from_str(json).unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].text, "fee");
        assert_eq!(fragments[0].rect.height, 4.0);
    }
}
