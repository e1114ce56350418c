//! Environment layer of configuration loading
//!
//! Kept in its own test binary with a single test: it sets process-wide
//! variables that would leak into any `CompareConfig::load` running in
//! parallel.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use doccompare_core::config::{CompareConfig, CorrelateOptions};

const MAX_CHARS: &str = "DOCCOMPARE__CHUNK__MAX_CHARS";
const ALIGN_TO_WORDS: &str = "DOCCOMPARE__DIFF__ALIGN_TO_WORDS";
const MIN_COVERAGE: &str = "DOCCOMPARE__CORRELATE__MIN_COVERAGE";
const LOOKAHEAD: &str = "DOCCOMPARE__CORRELATE__LOOKAHEAD";

#[test]
fn test_environment_layer_overrides_and_validates() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("doccompare.toml");
    std::fs::write(
        &path,
        "[chunk]\nmax_chars = 80\ncontext_chars = 30\n\n[diff]\nalign_to_words = true\n",
    )
    .unwrap();

    std::env::set_var(MAX_CHARS, "120");
    std::env::set_var(ALIGN_TO_WORDS, "false");
    std::env::set_var(MIN_COVERAGE, "0.5");

    let from_file = CompareConfig::load(Some(&path));
    let without_file = CompareConfig::load(None);

    std::env::remove_var(MAX_CHARS);
    std::env::remove_var(ALIGN_TO_WORDS);
    std::env::remove_var(MIN_COVERAGE);

    let from_file = from_file.unwrap();
    assert_eq!(from_file.chunk.max_chars, 120);
    assert_eq!(from_file.chunk.context_chars, 30);
    assert!(!from_file.diff.align_to_words);
    assert_eq!(from_file.correlate.min_coverage, 0.5);

    let without_file = without_file.unwrap();
    assert_eq!(without_file.chunk.max_chars, 120);
    assert_eq!(without_file.chunk.context_chars, 50);
    assert!(!without_file.diff.align_to_words);
    assert_eq!(without_file.correlate.min_match_chars, CorrelateOptions::default().min_match_chars);

    let restored = CompareConfig::load(None).unwrap();
    assert_eq!(restored, CompareConfig::default());

    std::env::set_var(LOOKAHEAD, "0");
    let rejected = CompareConfig::load(None);
    std::env::remove_var(LOOKAHEAD);
    assert!(rejected.is_err());
}
