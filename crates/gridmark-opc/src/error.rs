//! OPC package error types

use thiserror::Error;

/// Result type for package operations
pub type OpcResult<T> = std::result::Result<T, OpcError>;

/// Errors raised while loading or writing an OPC package
#[derive(Debug, Error)]
pub enum OpcError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// ZIP error
    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    /// XML error
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Not an OPC package
    #[error("Invalid package: {0}")]
    InvalidFormat(String),

    /// Missing required part
    #[error("Missing required part: {0}")]
    MissingPart(String),
}
