//! Greedy fragment matcher.
//!
//! Rendered fragments rarely line up with change boundaries: one change can
//! span several visual runs, and one run can hold a change plus unrelated
//! text. The matcher seeds on a fragment that is either contained in the
//! change text or contains it, extends over the following fragments while
//! they keep appearing further along in the change text, and accepts the run
//! when enough of the change is covered.

use crate::config::CorrelateOptions;
use crate::model::{ChangeRecord, Emphasis, Highlight, TextFragment};

/// Collapse every whitespace run to one space and trim the ends
pub(crate) fn normalize(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// A run of fragments accepted for one change
struct Match {
    fragment_indices: Vec<usize>,
    matched_chars: usize,
}

/// Minimum matched chars for a run to be accepted
fn required_chars(change_chars: usize, opts: &CorrelateOptions) -> f64 {
    let relative = opts.min_coverage * change_chars as f64;
    relative.min(opts.min_match_chars as f64)
}

/// Try to build a match seeded at `start`
fn match_at(
    change_text: &str,
    change_chars: usize,
    fragments: &[String],
    start: usize,
    opts: &CorrelateOptions,
) -> Option<Match> {
    let seed = &fragments[start];
    let seed_chars = seed.chars().count();
    if seed_chars < opts.min_fragment_chars {
        return None;
    }

    if let Some(at) = change_text.find(seed.as_str()) {
        let mut found = Match {
            fragment_indices: vec![start],
            matched_chars: seed_chars,
        };
        let mut cursor = at + seed.len();

        let window_end = fragments.len().min(start + opts.lookahead);
        for (idx, text) in fragments.iter().enumerate().take(window_end).skip(start + 1) {
            if text.is_empty() {
                continue;
            }
            match change_text[cursor..].find(text.as_str()) {
                Some(rel) => {
                    cursor += rel + text.len();
                    found.matched_chars += text.chars().count();
                    found.fragment_indices.push(idx);
                }
                None => break,
            }
        }
        return Some(found);
    }

    if change_chars >= opts.min_fragment_chars && seed.contains(change_text) {
        return Some(Match {
            fragment_indices: vec![start],
            matched_chars: change_chars,
        });
    }

    None
}

/// A layout with every fragment's text normalized once
///
/// Built once per rebuild and shared by every change of the side.
pub(crate) struct NormalizedLayout<'a> {
    fragments: &'a [TextFragment],
    texts: Vec<String>,
}

impl<'a> NormalizedLayout<'a> {
    pub(crate) fn new(fragments: &'a [TextFragment]) -> Self {
        Self {
            fragments,
            texts: fragments.iter().map(|f| normalize(&f.text)).collect(),
        }
    }
}

/// Locate the rendered fragments that show one change
///
/// Returns one highlight per matched fragment, all dimmed. An empty result
/// is a normal outcome: the change simply has nothing to draw.
pub fn correlate(
    change: &ChangeRecord,
    fragments: &[TextFragment],
    opts: &CorrelateOptions,
) -> Vec<Highlight> {
    correlate_in(change, &NormalizedLayout::new(fragments), opts)
}

pub(crate) fn correlate_in(
    change: &ChangeRecord,
    layout: &NormalizedLayout<'_>,
    opts: &CorrelateOptions,
) -> Vec<Highlight> {
    let change_text = normalize(&change.text);
    let change_chars = change_text.chars().count();
    if change_chars == 0 || layout.texts.is_empty() {
        return Vec::new();
    }

    let normalized = &layout.texts;
    let required = required_chars(change_chars, opts);

    let mut highlights = Vec::new();
    let mut idx = 0;
    while idx < normalized.len() {
        let accepted = match_at(&change_text, change_chars, normalized, idx, opts)
            .filter(|m| m.matched_chars as f64 >= required);

        match accepted {
            Some(m) => {
                for &fragment_index in &m.fragment_indices {
                    let fragment = &layout.fragments[fragment_index];
                    highlights.push(Highlight {
                        change_id: change.id.clone(),
                        kind: change.kind,
                        page: fragment.page,
                        rect: fragment.rect,
                        fragment_index,
                        emphasis: Emphasis::Dimmed,
                    });
                }
                idx = m.fragment_indices.last().map_or(idx, |last| last + 1).max(idx + 1);
            }
            None => idx += 1,
        }
    }

    highlights
}
