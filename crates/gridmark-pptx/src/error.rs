//! PPTX error types

use thiserror::Error;

/// Result type for PPTX operations
pub type PptxResult<T> = std::result::Result<T, PptxError>;

/// Errors that can occur during PPTX reading/writing
#[derive(Debug, Error)]
pub enum PptxError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Package (ZIP container) error
    #[error(transparent)]
    Opc(#[from] gridmark_opc::OpcError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Invalid file format
    #[error("Invalid PPTX format: {0}")]
    InvalidFormat(String),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),

    /// Core error
    #[error("Core error: {0}")]
    Core(#[from] gridmark_core::Error),
}

impl From<PptxError> for gridmark_core::Error {
    fn from(err: PptxError) -> Self {
        match err {
            PptxError::Core(inner) => inner,
            other => gridmark_core::Error::writer(other.to_string()),
        }
    }
}
