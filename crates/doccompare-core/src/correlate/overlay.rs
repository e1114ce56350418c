//! Per-document highlight collection.
//!
//! A [`HighlightSet`] is rebuilt from scratch whenever the document's layout
//! changes and is otherwise only touched by selection. Renderers consume
//! [`OverlayDelta`]s computed between two sets instead of patching their
//! overlay elements by hand.

use std::collections::{BTreeMap, HashMap};

use doccompare_core_types::ChangeId;
use serde::{Deserialize, Serialize};

use super::matcher::{correlate_in, NormalizedLayout};
use crate::config::CorrelateOptions;
use crate::model::{ChangeRecord, DocumentSide, Emphasis, Highlight, TextFragment};

/// All highlights drawn on one document, keyed by change id
#[derive(Debug, Clone, PartialEq)]
pub struct HighlightSet {
    side: DocumentSide,
    highlights: Vec<Highlight>,
    by_change: BTreeMap<ChangeId, Vec<usize>>,
    selected: Option<ChangeId>,
}

impl HighlightSet {
    /// A set with no highlights, as before any layout has been supplied
    pub fn empty(side: DocumentSide) -> Self {
        Self {
            side,
            highlights: Vec::new(),
            by_change: BTreeMap::new(),
            selected: None,
        }
    }

    /// Correlate every change that belongs on `side` against its layout
    ///
    /// Changes of the other kind are ignored: deletions are only drawn on
    /// the original document, additions only on the updated one.
    pub fn build(
        side: DocumentSide,
        changes: &[ChangeRecord],
        fragments: &[TextFragment],
        opts: &CorrelateOptions,
    ) -> Self {
        let mut set = Self::empty(side);
        let layout = NormalizedLayout::new(fragments);
        for change in changes.iter().filter(|c| c.kind.side() == side) {
            for highlight in correlate_in(change, &layout, opts) {
                set.push(highlight);
            }
        }

        tracing::debug!(
            side = %side,
            changes = changes.len(),
            fragments = fragments.len(),
            highlights = set.len(),
            "highlight set built"
        );
        set
    }

    fn push(&mut self, highlight: Highlight) {
        self.by_change
            .entry(highlight.change_id.clone())
            .or_default()
            .push(self.highlights.len());
        self.highlights.push(highlight);
    }

    pub fn side(&self) -> DocumentSide {
        self.side
    }

    /// Emphasize the highlights of one change and dim all others
    ///
    /// Returns how many highlights are now selected. Passing `None` dims
    /// everything.
    pub fn select(&mut self, change_id: Option<&ChangeId>) -> usize {
        let mut selected = 0;
        for highlight in &mut self.highlights {
            highlight.emphasis = if Some(&highlight.change_id) == change_id {
                selected += 1;
                Emphasis::Selected
            } else {
                Emphasis::Dimmed
            };
        }
        self.selected = change_id.cloned();
        selected
    }

    /// The change currently emphasized, if any
    pub fn selected(&self) -> Option<&ChangeId> {
        self.selected.as_ref()
    }

    pub fn for_change<'a>(&'a self, change_id: &ChangeId) -> impl Iterator<Item = &'a Highlight> + 'a {
        self.by_change
            .get(change_id)
            .into_iter()
            .flatten()
            .map(move |&idx| &self.highlights[idx])
    }

    /// Ids of the changes that have at least one highlight
    pub fn change_ids(&self) -> impl Iterator<Item = &ChangeId> {
        self.by_change.keys()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Highlight> {
        self.highlights.iter()
    }

    pub fn len(&self) -> usize {
        self.highlights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.highlights.is_empty()
    }

    /// What a renderer must do to go from `previous` to this set
    ///
    /// Highlights are the same overlay element when they share change id,
    /// fragment index, page and rectangle. Same element with a different
    /// emphasis is `restyled`.
    pub fn delta_from(&self, previous: &HighlightSet) -> OverlayDelta {
        let mut prior: HashMap<(&ChangeId, usize), &Highlight> =
            previous.highlights.iter().map(|h| (h.key(), h)).collect();

        let mut delta = OverlayDelta::default();
        for highlight in &self.highlights {
            match prior.remove(&highlight.key()) {
                Some(old) if same_geometry(old, highlight) => {
                    if old.emphasis != highlight.emphasis {
                        delta.restyled.push(highlight.clone());
                    }
                }
                Some(old) => {
                    delta.removed.push(old.clone());
                    delta.added.push(highlight.clone());
                }
                None => delta.added.push(highlight.clone()),
            }
        }

        // Keep removals in the previous set's order
        delta.removed.extend(
            previous
                .highlights
                .iter()
                .filter(|h| prior.contains_key(&h.key()))
                .cloned(),
        );
        delta
    }
}

impl<'a> IntoIterator for &'a HighlightSet {
    type Item = &'a Highlight;
    type IntoIter = std::slice::Iter<'a, Highlight>;

    fn into_iter(self) -> Self::IntoIter {
        self.highlights.iter()
    }
}

fn same_geometry(a: &Highlight, b: &Highlight) -> bool {
    a.page == b.page && a.rect == b.rect
}

/// Declarative overlay update between two highlight sets
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverlayDelta {
    pub added: Vec<Highlight>,
    pub removed: Vec<Highlight>,
    /// Present in both sets with unchanged geometry but new emphasis
    pub restyled: Vec<Highlight>,
}

impl OverlayDelta {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.restyled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChangeContext, ChangeKind, Rect};

    fn record(ordinal: usize, kind: ChangeKind, text: &str) -> ChangeRecord {
        ChangeRecord {
            id: ChangeId::from_ordinal(ordinal),
            kind,
            text: text.to_string(),
            context: ChangeContext::default(),
            position: ordinal * 10,
        }
    }

    fn layout(y: f64) -> Vec<TextFragment> {
        vec![
            TextFragment::new(0, Rect::new(10.0, y, 200.0, 12.0), "The fee is $150."),
            TextFragment::new(0, Rect::new(10.0, y + 14.0, 200.0, 12.0), "Payment is due monthly."),
        ]
    }

    #[test]
    fn test_build_only_uses_changes_of_its_side() {
        let changes = vec![
            record(0, ChangeKind::Deletion, "100"),
            record(1, ChangeKind::Addition, "150"),
        ];
        let set = HighlightSet::build(
            DocumentSide::Updated,
            &changes,
            &layout(0.0),
            &CorrelateOptions::default(),
        );
        assert_eq!(set.len(), 1);
        assert_eq!(set.for_change(&ChangeId::from_ordinal(1)).count(), 1);
        assert_eq!(set.for_change(&ChangeId::from_ordinal(0)).count(), 0);
    }

    #[test]
    fn test_build_matches_per_change_correlation() {
        let changes = vec![
            record(0, ChangeKind::Addition, "150"),
            record(1, ChangeKind::Addition, "Payment  is\ndue"),
            record(2, ChangeKind::Addition, "absent"),
        ];
        let fragments = layout(0.0);
        let opts = CorrelateOptions::default();

        let set = HighlightSet::build(DocumentSide::Updated, &changes, &fragments, &opts);
        let expected: Vec<Highlight> = changes
            .iter()
            .flat_map(|c| crate::correlate::correlate(c, &fragments, &opts))
            .collect();

        assert_eq!(set.iter().cloned().collect::<Vec<_>>(), expected);
        assert_eq!(set.for_change(&ChangeId::from_ordinal(1)).count(), 1);
    }

    #[test]
    fn test_delta_between_layouts_replaces_geometry() {
        let changes = vec![record(0, ChangeKind::Addition, "150")];
        let opts = CorrelateOptions::default();
        let before = HighlightSet::build(DocumentSide::Updated, &changes, &layout(0.0), &opts);
        let after = HighlightSet::build(DocumentSide::Updated, &changes, &layout(50.0), &opts);

        let delta = after.delta_from(&before);
        assert_eq!(delta.added.len(), 1);
        assert_eq!(delta.removed.len(), 1);
        assert!(delta.restyled.is_empty());
        assert!(after.delta_from(&after).is_empty());
    }

    #[test]
    fn test_delta_from_empty_adds_everything() {
        let changes = vec![record(0, ChangeKind::Addition, "150")];
        let set = HighlightSet::build(
            DocumentSide::Updated,
            &changes,
            &layout(0.0),
            &CorrelateOptions::default(),
        );
        let delta = set.delta_from(&HighlightSet::empty(DocumentSide::Updated));
        assert_eq!(delta.added.len(), set.len());
        assert!(delta.removed.is_empty());
    }
}
