//! Error types for gridmark-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in gridmark-core
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid grid reference format
    #[error("Invalid grid reference: {0}")]
    InvalidReference(String),

    /// Grid configuration rejected by validation
    #[error("Invalid grid configuration: {0}")]
    InvalidConfig(String),

    /// Referenced input file does not exist
    #[error("Input not found: {0}")]
    InputNotFound(String),

    /// A slide handle that the writer never handed out
    #[error("Unknown slide handle {0}")]
    UnknownSlide(usize),

    /// A shape handle that does not exist on the slide
    #[error("Unknown shape handle {0} on slide {1}")]
    UnknownShape(u32, usize),

    /// Failure reported by a presentation writer backend
    #[error("Presentation writer error: {0}")]
    Writer(String),

    /// Generic error with message
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Error::Other(msg.into())
    }

    /// Wrap a backend failure as a writer error
    pub fn writer<S: Into<String>>(msg: S) -> Self {
        Error::Writer(msg.into())
    }
}
