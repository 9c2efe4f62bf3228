//! Error types for the timebars core.

use thiserror::Error;

/// Errors produced by color parsing and palette generation.
#[derive(Debug, Error)]
pub enum PaletteError {
    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A palette configuration failed validation.
    #[error("invalid palette config: {0}")]
    InvalidConfig(String),

    /// More colors were requested than the candidate grid contains.
    #[error("requested {requested} colors but the candidate grid only holds {available}")]
    InsufficientCandidates {
        requested: usize,
        available: usize,
    },
}
