#![allow(clippy::unwrap_used, clippy::expect_used)]

use doccompare_core::config::ExtractOptions;
use doccompare_core::errors::DocCompareError;
use doccompare_core::extract::{BackendError, ExtractorRegistry, FormatBackend, TextExtractor};
use doccompare_core::model::{DocumentInput, DocumentKind, DocumentSide};

/// Stand-in for a host-supplied Word decoder
struct FakeDocx;

impl FormatBackend for FakeDocx {
    fn name(&self) -> &'static str {
        "fake-docx"
    }

    fn kinds(&self) -> &'static [DocumentKind] {
        &[DocumentKind::Docx, DocumentKind::Doc]
    }

    fn extract_text(&self, bytes: &[u8]) -> Result<String, BackendError> {
        Ok(format!("{} bytes of Word", bytes.len()))
    }
}

#[test]
fn test_plain_text_roundtrip() {
    let registry = ExtractorRegistry::default();
    let input = DocumentInput::plain_text("v1.txt", "Hello world");

    let text = registry.extract(DocumentSide::Original, &input).unwrap();
    assert_eq!(text, "Hello world");
}

#[test]
fn test_pdf_without_backend_is_unsupported() {
    let registry = ExtractorRegistry::default();
    let input = DocumentInput::new("v1.pdf", "application/pdf", b"%PDF-1.7".to_vec());

    let err = registry.extract(DocumentSide::Original, &input).unwrap_err();
    assert!(matches!(
        err,
        DocCompareError::UnsupportedFormat {
            side: DocumentSide::Original,
            ..
        }
    ));
    assert_eq!(err.user_message(), "Only PDF and Word documents are supported");
}

#[test]
fn test_unknown_type_is_unsupported() {
    let registry = ExtractorRegistry::default();
    let input = DocumentInput::from_file_name("diagram.png", vec![0x89, 0x50]);

    let err = registry.extract(DocumentSide::Updated, &input).unwrap_err();
    match err {
        DocCompareError::UnsupportedFormat { mime_type, .. } => {
            assert_eq!(mime_type, "application/octet-stream");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_host_backend_is_dispatched_by_kind() {
    let registry = ExtractorRegistry::default().with_backend(FakeDocx);
    let input = DocumentInput::from_file_name("contract.docx", vec![0; 12]);

    let text = registry.extract(DocumentSide::Updated, &input).unwrap();
    assert_eq!(text, "12 bytes of Word");
}

#[test]
fn test_size_limit_checked_before_decoding() {
    let options = ExtractOptions {
        max_document_bytes: 8,
        ..ExtractOptions::default()
    };
    let registry = ExtractorRegistry::new(options);
    let input = DocumentInput::plain_text("big.txt", "more than eight bytes");

    let err = registry.extract(DocumentSide::Original, &input).unwrap_err();
    match err {
        DocCompareError::DocumentTooLarge { size, limit, .. } => {
            assert_eq!(size, 21);
            assert_eq!(limit, 8);
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[test]
fn test_empty_text_rejected_by_default() {
    let registry = ExtractorRegistry::default();
    let input = DocumentInput::plain_text("blank.txt", "  \n ");

    let err = registry.extract(DocumentSide::Updated, &input).unwrap_err();
    assert_eq!(
        err,
        DocCompareError::EmptyDocument {
            side: DocumentSide::Updated,
            document: "blank.txt".to_string(),
        }
    );
}

#[test]
fn test_empty_text_allowed_when_configured() {
    let registry = ExtractorRegistry::new(ExtractOptions {
        allow_empty_text: true,
        ..ExtractOptions::default()
    });
    let input = DocumentInput::plain_text("blank.txt", "");

    assert_eq!(registry.extract(DocumentSide::Original, &input).unwrap(), "");
}

#[test]
fn test_invalid_utf8_fails_extraction() {
    let registry = ExtractorRegistry::default();
    let input = DocumentInput::new("latin1.txt", "text/plain", vec![0x63, 0x61, 0x66, 0xe9]);

    let err = registry.extract(DocumentSide::Original, &input).unwrap_err();
    assert!(matches!(err, DocCompareError::ExtractionFailed { .. }));
    assert_eq!(err.side(), Some(DocumentSide::Original));
}

#[test]
fn test_registry_debug_never_shows_content() {
    let registry = ExtractorRegistry::default();
    let input = DocumentInput::plain_text("secret.txt", "salary: 100000");

    let rendered = format!("{:?} {:?}", registry, input);
    assert!(!rendered.contains("100000"));
}
