//! Error types for breathe.

use thiserror::Error;

/// Errors produced by the breathe library and binary.
#[derive(Debug, Error)]
pub enum BreatheError {
    /// Configuration could not be loaded, saved, or resolved.
    #[error("configuration error: {0}")]
    Config(String),

    /// The local session store failed.
    #[error("database error: {0}")]
    Database(String),

    /// A requested item does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// An exercise definition violates its pattern rules.
    #[error("invalid exercise '{id}': {reason}")]
    InvalidExercise {
        /// Exercise identifier.
        id: String,
        /// What is wrong with it.
        reason: String,
    },

    /// Input could not be parsed.
    #[error("parse error: {0}")]
    Parse(String),

    /// Terminal setup or drawing failed.
    #[error("terminal error: {0}")]
    Terminal(String),

    /// Filesystem or stdio failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for BreatheError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(format!("JSON error: {e}"))
    }
}

impl From<rusqlite::Error> for BreatheError {
    fn from(e: rusqlite::Error) -> Self {
        Self::Database(e.to_string())
    }
}
