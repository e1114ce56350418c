//! Text-to-result pipeline: diff, then chunk.

use chrono::Utc;
use doccompare_core_types::ComparisonId;

use crate::chunk::chunk;
use crate::config::CompareConfig;
use crate::diff::diff_with;
use crate::model::{ComparisonResult, DocumentSummary, ExtractedText};

fn summarize(doc: &ExtractedText) -> DocumentSummary {
    DocumentSummary {
        name: doc.name.clone(),
        kind: doc.kind,
        char_count: doc.char_count(),
    }
}

/// Compare two extracted texts and build a fresh [`ComparisonResult`]
///
/// Total: any pair of texts, including empty ones, yields a result.
pub fn compare_texts(
    original: &ExtractedText,
    updated: &ExtractedText,
    config: &CompareConfig,
) -> ComparisonResult {
    let ops = diff_with(&original.text, &updated.text, &config.diff);
    let (changes, stats) = chunk(&ops, &config.chunk);

    ComparisonResult {
        id: ComparisonId::new(),
        created_at: Utc::now(),
        original: summarize(original),
        updated: summarize(updated),
        stats,
        changes,
    }
}
