//! Error types for MovieCore.
//!
//! This module defines all error types used throughout the library.

use thiserror::Error;

/// Result type alias for MovieCore operations
pub type MovieResult<T> = Result<T, MovieError>;

/// Main error type for MovieCore operations
#[derive(Error, Debug)]
pub enum MovieError {
    #[error("Validation error in {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Save failed: {0}")]
    SaveFailed(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Empty response from server")]
    NoData,

    #[error("Failed to decode response: {0}")]
    FailedDecode(String),

    #[error("Failed to encode movie: {0}")]
    FailedEncode(String),

    #[error("Movie has no identifier")]
    NoIdentifier,

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("UUID error: {0}")]
    Uuid(#[from] uuid::Error),
}

impl MovieError {
    /// Create a new validation error
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        MovieError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a new network error
    pub fn network(message: impl Into<String>) -> Self {
        MovieError::Network(message.into())
    }

    /// Create a new save-failed error
    pub fn save_failed(message: impl Into<String>) -> Self {
        MovieError::SaveFailed(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_display() {
        let err = MovieError::validation("title", "must not be empty");
        assert_eq!(
            err.to_string(),
            "Validation error in title: must not be empty"
        );
    }

    #[test]
    fn test_network_error() {
        let err = MovieError::network("connection refused");
        assert!(matches!(err, MovieError::Network(_)));
    }

    #[test]
    fn test_no_identifier_display() {
        assert_eq!(
            MovieError::NoIdentifier.to_string(),
            "Movie has no identifier"
        );
    }
}
