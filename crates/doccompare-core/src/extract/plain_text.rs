//! Built-in backend for plain text and Markdown.

use super::{BackendError, FormatBackend};
use crate::model::DocumentKind;

const BOM: char = '\u{feff}';

/// Decodes strict UTF-8, dropping a leading byte order mark and turning
/// CRLF line endings into LF.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainTextBackend;

impl FormatBackend for PlainTextBackend {
    fn name(&self) -> &'static str {
        "plain-text"
    }

    fn kinds(&self) -> &'static [DocumentKind] {
        &[DocumentKind::PlainText]
    }

    fn extract_text(&self, bytes: &[u8]) -> Result<String, BackendError> {
        let text = std::str::from_utf8(bytes)?;
        let text = text.strip_prefix(BOM).unwrap_or(text);
        Ok(text.replace("\r\n", "\n"))
    }
}
