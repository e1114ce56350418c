//! Diff computation engine.
//!
//! [`diff_with`] runs Myers' algorithm over chars via `similar`, coalesces
//! the per-char changes into runs, then applies
//! [`semantic_cleanup`](super::cleanup::semantic_cleanup).

use similar::{Algorithm, ChangeTag, TextDiff};
use std::time::{Duration, Instant};

use crate::config::DiffOptions;
use crate::diff::cleanup::semantic_cleanup;
use crate::model::EditOp;

/// Diff two texts with default options
pub fn diff(original: &str, updated: &str) -> Vec<EditOp> {
    diff_with(original, updated, &DiffOptions::default())
}

/// Diff two texts
///
/// Never fails. The returned script is ordered so that its old side
/// reconstructs `original` and its new side reconstructs `updated`.
pub fn diff_with(original: &str, updated: &str, opts: &DiffOptions) -> Vec<EditOp> {
    if original == updated {
        return if original.is_empty() {
            Vec::new()
        } else {
            vec![EditOp::Equal(original.to_string())]
        };
    }

    let start = Instant::now();
    let raw = raw_diff(original, updated, opts);
    let raw_len = raw.len();
    let ops = semantic_cleanup(raw, opts);

    tracing::debug!(
        original_chars = original.chars().count(),
        updated_chars = updated.chars().count(),
        raw_ops = raw_len,
        ops = ops.len(),
        duration_ms = start.elapsed().as_millis() as u64,
        "diff computed"
    );
    ops
}

/// Minimal char diff with consecutive same-kind changes merged
fn raw_diff(original: &str, updated: &str, opts: &DiffOptions) -> Vec<EditOp> {
    let text_diff = TextDiff::configure()
        .algorithm(Algorithm::Myers)
        .timeout(Duration::from_millis(opts.timeout_ms))
        .diff_chars(original, updated);

    let mut ops: Vec<EditOp> = Vec::new();
    for change in text_diff.iter_all_changes() {
        let value = change.value();
        let tag = change.tag();
        let extended = match (ops.last_mut(), tag) {
            (Some(EditOp::Equal(run)), ChangeTag::Equal)
            | (Some(EditOp::Delete(run)), ChangeTag::Delete)
            | (Some(EditOp::Insert(run)), ChangeTag::Insert) => {
                run.push_str(value);
                true
            }
            _ => false,
        };
        if !extended {
            ops.push(match tag {
                ChangeTag::Equal => EditOp::Equal(value.to_string()),
                ChangeTag::Delete => EditOp::Delete(value.to_string()),
                ChangeTag::Insert => EditOp::Insert(value.to_string()),
            });
        }
    }
    ops
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::edit::{reconstruct_new, reconstruct_old};

    #[test]
    fn test_raw_diff_merges_runs() {
        let ops = raw_diff("abc", "abxyc", &DiffOptions::default());
        assert_eq!(
            ops,
            vec![
                EditOp::Equal("ab".into()),
                EditOp::Insert("xy".into()),
                EditOp::Equal("c".into()),
            ]
        );
    }

    #[test]
    fn test_empty_inputs() {
        assert!(diff("", "").is_empty());
        assert_eq!(diff("", "new"), vec![EditOp::Insert("new".into())]);
        assert_eq!(diff("old", ""), vec![EditOp::Delete("old".into())]);
    }

    #[test]
    fn test_zero_timeout_still_reconstructs() {
        let opts = DiffOptions {
            timeout_ms: 0,
            ..DiffOptions::default()
        };
        let a = "the quick brown fox jumps over the lazy dog";
        let b = "a quick red fox leapt over some lazy dogs";
        let ops = diff_with(a, b, &opts);
        assert_eq!(reconstruct_old(&ops), a);
        assert_eq!(reconstruct_new(&ops), b);
    }
}
