//! Error types for Patchbay

use thiserror::Error;

/// Result type alias for Patchbay operations
pub type PatchbayResult<T> = Result<T, PatchbayError>;

/// Main error type for Patchbay
///
/// Note that per-edit patch failures (file not found, search string not
/// found, hunk context mismatch) are *not* errors of this type: they are
/// collected into the apply report so the batch can continue. This enum
/// covers faults that make an operation as a whole unusable.
#[derive(Error, Debug, Clone)]
pub enum PatchbayError {
    /// Invalid input errors (malformed requests, bad timeline state)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// History/timeline errors
    #[error("History error: {0}")]
    History(String),

    /// Session related errors
    #[error("Session error: {0}")]
    Session(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

impl PatchbayError {
    /// Create a new invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a new history error
    pub fn history(message: impl Into<String>) -> Self {
        Self::History(message.into())
    }

    /// Create a new session error
    pub fn session(message: impl Into<String>) -> Self {
        Self::Session(message.into())
    }
}

impl From<anyhow::Error> for PatchbayError {
    fn from(error: anyhow::Error) -> Self {
        Self::Other(error.to_string())
    }
}

impl From<serde_json::Error> for PatchbayError {
    fn from(error: serde_json::Error) -> Self {
        Self::Json(error.to_string())
    }
}
