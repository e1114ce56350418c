pub mod compare;
pub mod config;
pub mod highlight;

use std::path::{Path, PathBuf};

use doccompare_core::config::CompareConfig;
use doccompare_core::correlate::parse_layout_json;
use doccompare_core::errors::{DocCompareError, Result};
use doccompare_core::model::{DocumentInput, TextFragment};

/// Load configuration from an optional file plus the environment
pub fn load_config(path: Option<&PathBuf>) -> Result<CompareConfig> {
    CompareConfig::load(path.map(PathBuf::as_path))
}

/// Read a document from disk, typing it by file extension
pub fn read_document(path: &Path) -> Result<DocumentInput> {
    let bytes = std::fs::read(path).map_err(|e| read_error(path, e))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(DocumentInput::from_file_name(name, bytes))
}

/// Read and validate a JSON fragment layout
pub fn read_layout(path: &Path) -> Result<Vec<TextFragment>> {
    let json = std::fs::read_to_string(path).map_err(|e| read_error(path, e))?;
    parse_layout_json(&json)
}

/// Render a value as pretty JSON for stdout
pub fn to_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}

fn read_error(path: &Path, err: std::io::Error) -> DocCompareError {
    DocCompareError::Io {
        message: format!("cannot read {}: {}", path.display(), err),
    }
}
