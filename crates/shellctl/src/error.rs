//! Error handling for the shellctl crate.

use std::result;

use thiserror::Error;

/// Convenient result type for shellctl operations.
pub type Result<T> = result::Result<T, Error>;

/// Errors that can occur while running shellctl.
#[derive(Debug, Error)]
pub enum Error {
    /// A layer file could not be read or parsed.
    #[error("Configuration error: {0}")]
    Config(#[from] config::Error),
    /// The `--events` script did not parse.
    #[error("Invalid event script: {0}")]
    Events(String),
    /// Output could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    /// One or more files failed `check`.
    #[error("{failed} of {total} layer files failed validation")]
    CheckFailed {
        /// Files that failed.
        failed: usize,
        /// Files checked.
        total: usize,
    },
}

impl Error {
    /// Multi-line rendering for the terminal; configuration errors include
    /// their source excerpt.
    pub fn pretty(&self) -> String {
        match self {
            Self::Config(e) => e.pretty(),
            other => other.to_string(),
        }
    }
}
