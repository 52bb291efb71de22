//! Error types for chart construction and rendering

use thiserror::Error;

/// Result type for chart operations
pub type ChartResult<T> = std::result::Result<T, ChartError>;

/// Errors raised while validating or rendering a chart
#[derive(Debug, Error)]
pub enum ChartError {
    /// The chart has nothing to draw
    #[error("chart has no data series")]
    NoSeries,

    /// A series does not provide one value per category
    #[error("series '{series}' has {found} values, expected {expected}")]
    LengthMismatch {
        series: String,
        expected: usize,
        found: usize,
    },

    /// A series has no values
    #[error("series '{0}' is empty")]
    EmptySeries(String),

    /// Axis bounds are unusable
    #[error("invalid axis bounds {min}..{max}")]
    InvalidBounds { min: f64, max: f64 },

    /// Non-positive or non-finite document size
    #[error("invalid chart size {width}x{height} in")]
    InvalidSize { width: f64, height: f64 },

    /// A value is NaN or infinite
    #[error("series '{series}' has a non-finite value")]
    NonFinite { series: String },

    /// Unrecognised export format
    #[error("unknown chart format '{0}' (expected svg or png)")]
    UnknownFormat(String),

    /// The SVG document could not be rasterized
    #[error("PNG export failed: {0}")]
    Raster(String),

    /// Error writing the rendered document
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
