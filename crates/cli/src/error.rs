//! Structured CLI errors with meaningful exit codes.
//!
//! Exit code scheme:
//! - 0:  success
//! - 2:  clap arg parse error (automatic, before our code runs)
//! - 10: palette error (bad config, too many colors requested)
//! - 11: chart error (unreadable log, missing series, render failure)
//! - 12: I/O error (log file read, figure write)
//! - 13: input error (bad argument values)
//! - 14: serialization error

use std::fmt;
use timebars_chart::ChartError;
use timebars_core::PaletteError;

/// Errors produced by CLI operations, each mapped to a distinct exit code.
pub enum CliError {
    /// A palette-level error (invalid config, count exceeds the grid).
    Palette(PaletteError),
    /// A chart-level error (bad log, missing series, render failure).
    Chart(ChartError),
    /// An I/O error (log file read, figure write).
    Io(String),
    /// A user input error (bad argument values).
    Input(String),
    /// A serialization error (JSON output failure).
    Serialization(String),
}

impl CliError {
    /// Returns the process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Palette(_) => 10,
            CliError::Chart(_) => 11,
            CliError::Io(_) => 12,
            CliError::Input(_) => 13,
            CliError::Serialization(_) => 14,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Palette(e) => write!(f, "{e}"),
            CliError::Chart(e) => write!(f, "{e}"),
            CliError::Io(msg) => write!(f, "{msg}"),
            CliError::Input(msg) => write!(f, "{msg}"),
            CliError::Serialization(msg) => write!(f, "{msg}"),
        }
    }
}

impl From<PaletteError> for CliError {
    fn from(e: PaletteError) -> Self {
        CliError::Palette(e)
    }
}

impl From<ChartError> for CliError {
    fn from(e: ChartError) -> Self {
        match e {
            ChartError::Io(msg) => CliError::Io(msg),
            other => CliError::Chart(other),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}
