//! Documents as they arrive from the host, before extraction.

use doccompare_core_types::Sensitive;
use serde::{Deserialize, Serialize};

pub const MIME_PDF: &str = "application/pdf";
pub const MIME_DOCX: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.document";
pub const MIME_DOC: &str = "application/msword";
pub const MIME_TEXT: &str = "text/plain";
pub const MIME_MARKDOWN: &str = "text/markdown";

/// Which of the two compared documents something belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSide {
    /// The earlier version ("doc1")
    Original,
    /// The later version ("doc2")
    Updated,
}

impl DocumentSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentSide::Original => "original",
            DocumentSide::Updated => "updated",
        }
    }
}

impl std::fmt::Display for DocumentSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Supported document formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Pdf,
    Docx,
    Doc,
    PlainText,
}

impl DocumentKind {
    /// Resolve a kind from a MIME type; parameters such as `; charset=utf-8`
    /// are ignored. Returns `None` for unsupported types.
    pub fn from_mime(mime_type: &str) -> Option<Self> {
        let essence = mime_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            MIME_PDF => Some(DocumentKind::Pdf),
            MIME_DOCX => Some(DocumentKind::Docx),
            MIME_DOC => Some(DocumentKind::Doc),
            MIME_TEXT | MIME_MARKDOWN => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    /// Resolve a kind from a file name's extension
    pub fn from_file_name(name: &str) -> Option<Self> {
        let (_, ext) = name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "pdf" => Some(DocumentKind::Pdf),
            "docx" => Some(DocumentKind::Docx),
            "doc" => Some(DocumentKind::Doc),
            "txt" | "text" | "md" => Some(DocumentKind::PlainText),
            _ => None,
        }
    }

    /// Canonical MIME type for this kind
    pub fn mime_type(&self) -> &'static str {
        match self {
            DocumentKind::Pdf => MIME_PDF,
            DocumentKind::Docx => MIME_DOCX,
            DocumentKind::Doc => MIME_DOC,
            DocumentKind::PlainText => MIME_TEXT,
        }
    }
}

/// An uploaded document awaiting extraction.
#[derive(Debug, Clone)]
pub struct DocumentInput {
    pub name: String,
    pub mime_type: String,
    pub bytes: Sensitive<Vec<u8>>,
}

impl DocumentInput {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            bytes: Sensitive::new(bytes),
        }
    }

    /// A plain-text document, mostly useful for tests and the CLI
    pub fn plain_text(name: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(name, MIME_TEXT, text.into().into_bytes())
    }

    /// Build an input whose MIME type is inferred from the file name.
    /// Unknown extensions keep an `application/octet-stream` type, which
    /// extraction later rejects as unsupported.
    pub fn from_file_name(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let name = name.into();
        let mime = DocumentKind::from_file_name(&name)
            .map(|k| k.mime_type())
            .unwrap_or("application/octet-stream");
        Self::new(name, mime, bytes)
    }

    /// Kind resolved from the MIME type, falling back to the file extension
    pub fn kind(&self) -> Option<DocumentKind> {
        DocumentKind::from_mime(&self.mime_type).or_else(|| DocumentKind::from_file_name(&self.name))
    }

    pub fn size(&self) -> usize {
        self.bytes.byte_len()
    }
}

/// Text extracted from one document, ready to be diffed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedText {
    pub name: String,
    pub kind: DocumentKind,
    pub text: String,
}

impl ExtractedText {
    pub fn new(name: impl Into<String>, kind: DocumentKind, text: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind,
            text: text.into(),
        }
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_mime() {
        assert_eq!(DocumentKind::from_mime(MIME_PDF), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_mime(MIME_DOCX), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_mime(MIME_DOC), Some(DocumentKind::Doc));
        assert_eq!(
            DocumentKind::from_mime("text/plain; charset=utf-8"),
            Some(DocumentKind::PlainText)
        );
        assert_eq!(DocumentKind::from_mime("image/png"), None);
    }

    #[test]
    fn test_kind_from_file_name() {
        assert_eq!(DocumentKind::from_file_name("Lease.PDF"), Some(DocumentKind::Pdf));
        assert_eq!(DocumentKind::from_file_name("a.b.docx"), Some(DocumentKind::Docx));
        assert_eq!(DocumentKind::from_file_name("notes"), None);
        assert_eq!(DocumentKind::from_file_name("photo.jpg"), None);
    }

    #[test]
    fn test_input_kind_falls_back_to_extension() {
        let input = DocumentInput::new("v1.pdf", "application/octet-stream", vec![1, 2, 3]);
        assert_eq!(input.kind(), Some(DocumentKind::Pdf));
        assert_eq!(input.size(), 3);
    }

    #[test]
    fn test_input_debug_hides_contents() {
        let input = DocumentInput::plain_text("a.txt", "top secret clause");
        let debug = format!("{:?}", input);
        assert!(debug.contains("a.txt"));
        assert!(!debug.contains("top secret"));
    }
}
