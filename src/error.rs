//! Error types for focusdeck.

use thiserror::Error;

/// Errors that can occur in focusdeck.
#[derive(Debug, Error)]
pub enum FocusdeckError {
    /// Configuration file or path problem.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Timer settings rejected at the boundary.
    #[error("Invalid settings: {0}")]
    InvalidSettings(String),

    /// `SQLite` failure.
    #[error("Database error: {0}")]
    Database(String),

    /// A requested item does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// User input that could not be interpreted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Terminal setup, drawing or event polling failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Desktop notification could not be delivered.
    #[error("Notification failed: {0}")]
    Notification(String),

    /// Audio cue could not be played.
    #[error("Audio playback failed: {0}")]
    Audio(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl FocusdeckError {
    /// Wrap a rusqlite error with context.
    pub(crate) fn db(context: &str, err: &rusqlite::Error) -> Self {
        Self::Database(format!("{context}: {err}"))
    }
}
