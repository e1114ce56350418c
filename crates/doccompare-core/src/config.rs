//! Configuration for comparison, chunking, correlation and extraction
//!
//! Values are layered: built-in defaults, then an optional TOML file, then
//! environment variables of the form `DOCCOMPARE__<SECTION>__<KEY>`
//! (for example `DOCCOMPARE__CHUNK__MAX_CHARS=80`).

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::{DocCompareError, Result};

/// Environment variable prefix for overrides
pub const ENV_PREFIX: &str = "DOCCOMPARE";

/// Tuning for the diff engine and its semantic cleanup pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiffOptions {
    /// Wall-clock budget for the raw diff; on expiry the script gets coarser
    /// but stays valid
    pub timeout_ms: u64,
    /// Equal runs of at most this many chars between two edits are folded
    /// into the surrounding edit
    pub noise_max_chars: usize,
    /// Widen edits that start or end inside a word to the word boundary
    pub align_to_words: bool,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            noise_max_chars: 3,
            align_to_words: true,
        }
    }
}

/// Tuning for the change chunker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChunkOptions {
    /// A pending buffer is flushed once it grows past this many chars
    pub max_chars: usize,
    /// Budget of unchanged context captured on each side of a record
    pub context_chars: usize,
}

impl Default for ChunkOptions {
    fn default() -> Self {
        Self {
            max_chars: 50,
            context_chars: 50,
        }
    }
}

/// Tuning for the highlight correlation matcher
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelateOptions {
    /// Fraction of the change text that must be matched
    pub min_coverage: f64,
    /// Absolute matched length that is always enough, even below `min_coverage`
    pub min_match_chars: usize,
    /// Maximum number of fragments a single match may span
    pub lookahead: usize,
    /// Fragments (and change texts) shorter than this never seed a match
    pub min_fragment_chars: usize,
}

impl Default for CorrelateOptions {
    fn default() -> Self {
        Self {
            min_coverage: 0.3,
            min_match_chars: 20,
            lookahead: 8,
            min_fragment_chars: 3,
        }
    }
}

/// Limits applied to uploaded documents before and after extraction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractOptions {
    pub max_document_bytes: usize,
    /// Accept documents whose extracted text is empty
    pub allow_empty_text: bool,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            max_document_bytes: 10 * 1024 * 1024,
            allow_empty_text: false,
        }
    }
}

/// Complete configuration for one comparison session
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompareConfig {
    pub diff: DiffOptions,
    pub chunk: ChunkOptions,
    pub correlate: CorrelateOptions,
    pub extract: ExtractOptions,
}

impl CompareConfig {
    /// Load configuration from defaults, an optional TOML file and the
    /// environment, then validate it
    ///
    /// # Errors
    ///
    /// `InvalidConfig` if the file cannot be read or parsed, or if any value
    /// fails [`CompareConfig::validate`].
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        );

        let loaded: CompareConfig = builder
            .build()
            .and_then(|c| c.try_deserialize())
            .map_err(|e| DocCompareError::InvalidConfig {
                message: e.to_string(),
            })?;

        loaded.validate()?;
        tracing::debug!(config = ?loaded, "loaded compare configuration");
        Ok(loaded)
    }

    /// Reject values that would make a stage meaningless
    ///
    /// # Errors
    ///
    /// `InvalidConfig` naming the offending key.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: &str| {
            Err(DocCompareError::InvalidConfig {
                message: message.to_string(),
            })
        };

        if self.chunk.max_chars == 0 {
            return invalid("chunk.max_chars must be greater than zero");
        }
        if !(self.correlate.min_coverage > 0.0 && self.correlate.min_coverage <= 1.0) {
            return invalid("correlate.min_coverage must be in (0, 1]");
        }
        if self.correlate.lookahead == 0 {
            return invalid("correlate.lookahead must be greater than zero");
        }
        if self.correlate.min_fragment_chars == 0 {
            return invalid("correlate.min_fragment_chars must be greater than zero");
        }
        if self.extract.max_document_bytes == 0 {
            return invalid("extract.max_document_bytes must be greater than zero");
        }
        Ok(())
    }

    pub fn with_diff(mut self, diff: DiffOptions) -> Self {
        self.diff = diff;
        self
    }

    pub fn with_chunk(mut self, chunk: ChunkOptions) -> Self {
        self.chunk = chunk;
        self
    }

    pub fn with_correlate(mut self, correlate: CorrelateOptions) -> Self {
        self.correlate = correlate;
        self
    }

    pub fn with_extract(mut self, extract: ExtractOptions) -> Self {
        self.extract = extract;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(CompareConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_chunk_size_rejected() {
        let config = CompareConfig::default().with_chunk(ChunkOptions {
            max_chars: 0,
            ..ChunkOptions::default()
        });
        let err = config.validate().unwrap_err();
        assert!(matches!(err, DocCompareError::InvalidConfig { .. }));
    }

    #[test]
    fn test_coverage_out_of_range_rejected() {
        let config = CompareConfig::default().with_correlate(CorrelateOptions {
            min_coverage: 1.5,
            ..CorrelateOptions::default()
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doccompare.toml");
        std::fs::write(&path, "[chunk]\nmax_chars = 80\n").unwrap();

        let config = CompareConfig::load(Some(&path)).unwrap();
        assert_eq!(config.chunk.max_chars, 80);
        assert_eq!(config.chunk.context_chars, 50);
        assert_eq!(config.correlate, CorrelateOptions::default());
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = CompareConfig::load(Some(Path::new("/definitely/not/here.toml"))).unwrap_err();
        assert!(matches!(err, DocCompareError::InvalidConfig { .. }));
    }
}
