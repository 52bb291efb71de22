//! Errors of the end-to-end pipelines

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Any failure of a bullet or chart pipeline
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Core(#[from] gridmark_core::Error),

    #[error(transparent)]
    Pptx(#[from] gridmark_pptx::PptxError),

    #[error(transparent)]
    Survey(#[from] gridmark_survey::SurveyError),

    #[error(transparent)]
    Chart(#[from] gridmark_chart::ChartError),
}

impl Error {
    /// Whether the error is a missing input file
    pub fn is_input_not_found(&self) -> bool {
        matches!(self, Error::Core(gridmark_core::Error::InputNotFound(_)))
    }
}
