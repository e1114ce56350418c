use crate::model::DocumentSide;
use doccompare_core_types::ComparisonId;
use thiserror::Error;

/// Result type alias using DocCompareError
pub type Result<T> = std::result::Result<T, DocCompareError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that hosts can use for programmatic
/// handling and that appears in `err.code` log fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Document intake
    UnsupportedFormat,
    DocumentTooLarge,
    EmptyDocument,
    ExtractionFailed,

    // Layout / correlation input
    InvalidLayout,

    // Session
    /// A newer comparison replaced this one before it finished
    Superseded,

    // Ambient
    InvalidConfig,
    Serialization,
    Io,

    // Internal
    Internal,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::UnsupportedFormat => "ERR_UNSUPPORTED_FORMAT",
            ExErrorKind::DocumentTooLarge => "ERR_DOCUMENT_TOO_LARGE",
            ExErrorKind::EmptyDocument => "ERR_EMPTY_DOCUMENT",
            ExErrorKind::ExtractionFailed => "ERR_EXTRACTION_FAILED",
            ExErrorKind::InvalidLayout => "ERR_INVALID_LAYOUT",
            ExErrorKind::Superseded => "ERR_SUPERSEDED",
            ExErrorKind::InvalidConfig => "ERR_INVALID_CONFIG",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Internal => "ERR_INTERNAL",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification plus whatever context the failing layer knew:
/// the operation, the document involved and the comparison it belonged to.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    side: Option<DocumentSide>,
    document: Option<String>,
    comparison_id: Option<ComparisonId>,
    message: String,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            side: None,
            document: None,
            comparison_id: None,
            message: String::new(),
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add the side of the document involved
    pub fn with_side(mut self, side: DocumentSide) -> Self {
        self.side = Some(side);
        self
    }

    /// Add the name of the document involved
    pub fn with_document(mut self, name: impl Into<String>) -> Self {
        self.document = Some(name.into());
        self
    }

    /// Add comparison context
    pub fn with_comparison_id(mut self, id: ComparisonId) -> Self {
        self.comparison_id = Some(id);
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    /// Get the stable error code
    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn side(&self) -> Option<DocumentSide> {
        self.side
    }

    pub fn document(&self) -> Option<&str> {
        self.document.as_deref()
    }

    pub fn comparison_id(&self) -> Option<&ComparisonId> {
        self.comparison_id.as_ref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(document) = &self.document {
            write!(f, " (document: {})", document)?;
        }
        if let Some(side) = self.side {
            write!(f, " (side: {})", side)?;
        }
        if let Some(id) = &self.comparison_id {
            write!(f, " (comparison_id: {})", id)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {}

// ========== End Error Facility ==========

/// Error taxonomy for DocCompare operations
///
/// The diff engine and chunker are total and have no variants here;
/// correlation never fails either. Everything below comes from document
/// intake, session bookkeeping or ambient concerns.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DocCompareError {
    // ===== Document intake =====
    /// The document's format has no extraction backend
    #[error("Unsupported format for {side} document '{document}': {mime_type}")]
    UnsupportedFormat {
        side: DocumentSide,
        document: String,
        mime_type: String,
    },

    /// The document exceeds the configured size limit
    #[error("{side} document '{document}' is {size} bytes, limit is {limit}")]
    DocumentTooLarge {
        side: DocumentSide,
        document: String,
        size: usize,
        limit: usize,
    },

    /// Extraction succeeded but produced no text
    #[error("No text could be extracted from {side} document '{document}'")]
    EmptyDocument { side: DocumentSide, document: String },

    /// The backend could not decode the document (corrupt or unreadable)
    #[error("Failed to extract text from {side} document '{document}': {reason}")]
    ExtractionFailed {
        side: DocumentSide,
        document: String,
        reason: String,
    },

    // ===== Layout =====
    /// A fragment layout could not be decoded
    #[error("Invalid layout: {reason}")]
    InvalidLayout { reason: String },

    // ===== Session =====
    /// A newer comparison was requested before this one finished
    #[error("Comparison generation {generation} was superseded")]
    Superseded { generation: u64 },

    // ===== Ambient =====
    #[error("Invalid configuration: {message}")]
    InvalidConfig { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    /// Unexpected failure (e.g. a background task panicked)
    #[error("Internal error: {message}")]
    Internal {
        side: Option<DocumentSide>,
        message: String,
    },
}

impl DocCompareError {
    /// The document that caused the error, when one did
    pub fn side(&self) -> Option<DocumentSide> {
        match self {
            DocCompareError::UnsupportedFormat { side, .. }
            | DocCompareError::DocumentTooLarge { side, .. }
            | DocCompareError::EmptyDocument { side, .. }
            | DocCompareError::ExtractionFailed { side, .. } => Some(*side),
            DocCompareError::Internal { side, .. } => *side,
            _ => None,
        }
    }

    /// Message suitable for showing to the person who uploaded the documents
    pub fn user_message(&self) -> String {
        match self {
            DocCompareError::UnsupportedFormat { .. } => {
                "Only PDF and Word documents are supported".to_string()
            }
            DocCompareError::DocumentTooLarge { limit, .. } => {
                format!("File size must be less than {}MB", limit / (1024 * 1024))
            }
            DocCompareError::EmptyDocument { document, .. }
            | DocCompareError::ExtractionFailed { document, .. } => {
                format!("Could not read this document: {}", document)
            }
            DocCompareError::Superseded { .. } => {
                "Comparison was replaced by a newer request".to_string()
            }
            _ => "Failed to compare documents".to_string(),
        }
    }
}

/// Conversion from DocCompareError to ExError
impl From<DocCompareError> for ExError {
    fn from(err: DocCompareError) -> Self {
        let message = err.to_string();
        match err {
            DocCompareError::UnsupportedFormat { side, document, .. } => {
                ExError::new(ExErrorKind::UnsupportedFormat)
                    .with_side(side)
                    .with_document(document)
                    .with_op("extract")
                    .with_message(message)
            }
            DocCompareError::DocumentTooLarge { side, document, .. } => {
                ExError::new(ExErrorKind::DocumentTooLarge)
                    .with_side(side)
                    .with_document(document)
                    .with_op("extract")
                    .with_message(message)
            }
            DocCompareError::EmptyDocument { side, document } => {
                ExError::new(ExErrorKind::EmptyDocument)
                    .with_side(side)
                    .with_document(document)
                    .with_op("extract")
                    .with_message(message)
            }
            DocCompareError::ExtractionFailed { side, document, .. } => {
                ExError::new(ExErrorKind::ExtractionFailed)
                    .with_side(side)
                    .with_document(document)
                    .with_op("extract")
                    .with_message(message)
            }
            DocCompareError::InvalidLayout { .. } => {
                ExError::new(ExErrorKind::InvalidLayout).with_message(message)
            }
            DocCompareError::Superseded { .. } => {
                ExError::new(ExErrorKind::Superseded).with_message(message)
            }
            DocCompareError::InvalidConfig { .. } => {
                ExError::new(ExErrorKind::InvalidConfig).with_message(message)
            }
            DocCompareError::Serialization { .. } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
            DocCompareError::Io { .. } => ExError::new(ExErrorKind::Io).with_message(message),
            DocCompareError::Internal { side, .. } => {
                let ex = ExError::new(ExErrorKind::Internal).with_message(message);
                match side {
                    Some(side) => ex.with_side(side),
                    None => ex,
                }
            }
        }
    }
}

/// Conversion from serde_json::Error to DocCompareError
impl From<serde_json::Error> for DocCompareError {
    fn from(err: serde_json::Error) -> Self {
        DocCompareError::Serialization {
            message: err.to_string(),
        }
    }
}
