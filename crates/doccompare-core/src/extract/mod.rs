//! Text extraction contract.
//!
//! Binary formats are decoded by backends the host registers; this module
//! owns the shared validation (size limit, supported kind, non-empty text)
//! and the dispatch from [`DocumentKind`] to backend.

pub mod plain_text;

pub use plain_text::PlainTextBackend;

use std::collections::HashMap;
use std::sync::Arc;

use crate::config::ExtractOptions;
use crate::errors::{DocCompareError, Result};
use crate::model::{DocumentInput, DocumentKind, DocumentSide};

/// Error a backend reports when it cannot decode a document
pub type BackendError = Box<dyn std::error::Error + Send + Sync>;

/// Turns one uploaded document into plain text.
///
/// Implementations are called from a blocking thread pool and may be slow.
pub trait TextExtractor: Send + Sync {
    /// Extract the text of `input`, which is the `side` document of the
    /// comparison
    ///
    /// # Errors
    ///
    /// `UnsupportedFormat`, `DocumentTooLarge`, `ExtractionFailed` or
    /// `EmptyDocument`, each naming the document.
    fn extract(&self, side: DocumentSide, input: &DocumentInput) -> Result<String>;
}

/// Decoder for one or more document formats
pub trait FormatBackend: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Formats this backend can decode
    fn kinds(&self) -> &'static [DocumentKind];

    fn extract_text(&self, bytes: &[u8]) -> std::result::Result<String, BackendError>;
}

/// [`TextExtractor`] that validates inputs and dispatches on document kind
#[derive(Clone)]
pub struct ExtractorRegistry {
    backends: HashMap<DocumentKind, Arc<dyn FormatBackend>>,
    options: ExtractOptions,
}

impl ExtractorRegistry {
    /// A registry with no backends; every document is unsupported
    pub fn empty(options: ExtractOptions) -> Self {
        Self {
            backends: HashMap::new(),
            options,
        }
    }

    /// A registry with the built-in plain text backend
    pub fn new(options: ExtractOptions) -> Self {
        Self::empty(options).with_backend(PlainTextBackend)
    }

    /// Register a backend for every kind it declares, replacing earlier ones
    pub fn with_backend<B: FormatBackend + 'static>(mut self, backend: B) -> Self {
        self.register(Arc::new(backend));
        self
    }

    pub fn register(&mut self, backend: Arc<dyn FormatBackend>) {
        for kind in backend.kinds() {
            self.backends.insert(*kind, backend.clone());
        }
    }

    pub fn supports(&self, kind: DocumentKind) -> bool {
        self.backends.contains_key(&kind)
    }
}

impl Default for ExtractorRegistry {
    fn default() -> Self {
        Self::new(ExtractOptions::default())
    }
}

impl std::fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<String> = self.backends.keys().map(|k| format!("{:?}", k)).collect();
        kinds.sort();
        f.debug_struct("ExtractorRegistry")
            .field("kinds", &kinds)
            .field("options", &self.options)
            .finish()
    }
}

impl TextExtractor for ExtractorRegistry {
    fn extract(&self, side: DocumentSide, input: &DocumentInput) -> Result<String> {
        let size = input.size();
        if size > self.options.max_document_bytes {
            return Err(DocCompareError::DocumentTooLarge {
                side,
                document: input.name.clone(),
                size,
                limit: self.options.max_document_bytes,
            });
        }

        let unsupported = || DocCompareError::UnsupportedFormat {
            side,
            document: input.name.clone(),
            mime_type: input.mime_type.clone(),
        };
        let kind = input.kind().ok_or_else(unsupported)?;
        let backend = self.backends.get(&kind).ok_or_else(unsupported)?;

        let text = backend
            .extract_text(input.bytes.expose())
            .map_err(|e| DocCompareError::ExtractionFailed {
                side,
                document: input.name.clone(),
                reason: e.to_string(),
            })?;

        if text.trim().is_empty() && !self.options.allow_empty_text {
            return Err(DocCompareError::EmptyDocument {
                side,
                document: input.name.clone(),
            });
        }

        tracing::debug!(
            side = %side,
            document = %input.name,
            backend = backend.name(),
            bytes = size,
            chars = text.chars().count(),
            "document text extracted"
        );
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingPdf;

    impl FormatBackend for FailingPdf {
        fn name(&self) -> &'static str {
            "failing-pdf"
        }

        fn kinds(&self) -> &'static [DocumentKind] {
            &[DocumentKind::Pdf]
        }

        fn extract_text(&self, _bytes: &[u8]) -> std::result::Result<String, BackendError> {
            Err("bad xref table".into())
        }
    }

    #[test]
    fn test_backend_failure_names_document() {
        let registry = ExtractorRegistry::default().with_backend(FailingPdf);
        let input = DocumentInput::new("v2.pdf", "application/pdf", vec![1, 2, 3]);

        let err = registry.extract(DocumentSide::Updated, &input).unwrap_err();
        match err {
            DocCompareError::ExtractionFailed {
                side,
                document,
                reason,
            } => {
                assert_eq!(side, DocumentSide::Updated);
                assert_eq!(document, "v2.pdf");
                assert_eq!(reason, "bad xref table");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_registered_kinds() {
        let registry = ExtractorRegistry::default();
        assert!(registry.supports(DocumentKind::PlainText));
        assert!(!registry.supports(DocumentKind::Pdf));
        assert!(!ExtractorRegistry::empty(ExtractOptions::default()).supports(DocumentKind::PlainText));
    }
}
