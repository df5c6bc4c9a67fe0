//! Error types for the artist finder.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for all catalog and session operations.
#[derive(Debug, Error)]
pub enum FinderError {
    /// The search query was blank.
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Token missing, malformed, or rejected by the API.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// The search returned no artist.
    #[error("Artist not found: {0}")]
    NotFound(String),

    /// HTTP request failed.
    #[error("Request error: {0}")]
    Connection(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The API answered with an error object.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Configuration is unusable.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl FinderError {
    /// Classify this error for display.
    pub fn kind(&self) -> ErrorKind {
        match self {
            FinderError::Validation(_) => ErrorKind::Validation,
            FinderError::Auth(_) | FinderError::Config(_) => ErrorKind::Auth,
            FinderError::Api { status: 401, .. } => ErrorKind::Auth,
            FinderError::NotFound(_) => ErrorKind::NotFound,
            FinderError::Connection(_) | FinderError::Parse(_) | FinderError::Api { .. } => {
                ErrorKind::Connection
            }
        }
    }
}

/// User-facing error taxonomy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Blank query, caught before any request.
    Validation,
    /// No usable token.
    Auth,
    /// Transport or remote failure.
    Connection,
    /// The search yielded no artist.
    NotFound,
}

impl ErrorKind {
    /// Short message shown in the error banner.
    pub fn message(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Please enter an artist name",
            ErrorKind::Auth => "Could not get a Spotify access token",
            ErrorKind::Connection => "Could not reach Spotify. Please try again.",
            ErrorKind::NotFound => "No artist found. Try another name.",
        }
    }
}

/// Result type alias for artist finder operations.
pub type Result<T> = std::result::Result<T, FinderError>;
