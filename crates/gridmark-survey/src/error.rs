//! Survey error types

use thiserror::Error;

/// Result type for survey operations
pub type SurveyResult<T> = std::result::Result<T, SurveyError>;

/// Errors that can occur while reading or aggregating survey workbooks
#[derive(Debug, Error)]
pub enum SurveyError {
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
    #[error("Invalid XLSX format: {0}")]
    InvalidFormat(String),

    /// Workbook has no sheet with this name
    #[error("Sheet not found: {0}")]
    MissingSheet(String),

    /// A cell that must hold a number does not
    #[error("{sheet}!{cell}: expected a number, found {found}")]
    NonNumeric {
        sheet: String,
        cell: String,
        found: String,
    },

    /// The reverse-coded transform needs exactly four values
    #[error("Balance transform needs 4 values, got {0}")]
    InvalidBalance(usize),

    /// Unrecognised question selector
    #[error("Unknown question: {0}")]
    UnknownQuestion(String),
}
