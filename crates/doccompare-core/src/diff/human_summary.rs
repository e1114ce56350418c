//! Human-readable summary renderer for comparison results.

use crate::model::ComparisonResult;

/// Render a plain-text summary of a [`ComparisonResult`].
///
/// Mirrors a results sidebar: added/removed counters, the total number of
/// changes, then one line per change in document order.
pub fn render_human_summary(result: &ComparisonResult) -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "Comparing '{}' ({} chars) with '{}' ({} chars)\n\n",
        result.original.name,
        result.original.char_count,
        result.updated.name,
        result.updated.char_count,
    ));

    out.push_str(&format!(
        "{} added  {} removed  {} unchanged\n",
        result.stats.additions, result.stats.deletions, result.stats.unchanged
    ));
    out.push_str(&format!("{} total changes\n\n", result.stats.total_changes));

    if result.is_unchanged() {
        out.push_str("No changes detected\n");
        return out;
    }

    for change in &result.changes {
        out.push_str(&format!(
            "[{}] {}: {}\n",
            change.id,
            change.kind.label(),
            single_line(&change.text)
        ));
    }

    out
}

/// Collapse line breaks so every change stays on one line
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
