//! Error types for log loading and chart rendering.

use thiserror::Error;

/// Errors produced while loading a timing log or rendering a figure.
#[derive(Debug, Error)]
pub enum ChartError {
    /// The CSV input could not be parsed.
    #[error("csv error: {0}")]
    Csv(String),

    /// No column header contains the configured series marker.
    #[error("no series columns: no header contains {marker:?}")]
    NoSeriesColumns { marker: String },

    /// The input has headers but no data rows.
    #[error("empty log: no data rows")]
    EmptyLog,

    /// Reading the log or writing the figure failed.
    #[error("io error: {0}")]
    Io(String),

    /// Figure dimensions must be non-zero.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// The palette length does not match the number of series.
    #[error("color count mismatch: {series} series but {colors} colors")]
    ColorCountMismatch { series: usize, colors: usize },

    /// The plotting backend failed while drawing.
    #[error("render error: {0}")]
    Render(String),
}
