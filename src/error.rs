// src/error.rs

//! Unified error handling for the library client.

use std::fmt;

use thiserror::Error;

/// Result type alias for library operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// Upstream answered with a non-2xx status
    #[error("HTTP error {0}")]
    Http(u16),

    /// Network-level failure before a status was received
    #[error("Transport error: {0}")]
    Transport(String),

    /// Retry budget exhausted on a rate-limited endpoint
    #[error("Max retries reached after {attempts} attempt(s)")]
    MaxRetriesExceeded { attempts: u32 },

    /// Search issued with a blank query
    #[error("No search query provided")]
    EmptyQuery,

    /// Detail view opened without a book key
    #[error("No book key provided")]
    EmptyKey,

    /// Primary bibliographic record could not be loaded
    #[error("Failed to load book details for {key}: {reason}")]
    DetailLoadFailed { key: String, reason: String },

    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// TOML serialization failed
    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),
}

impl From<reqwest::Error> for AppError {
    fn from(error: reqwest::Error) -> Self {
        Self::Transport(error.to_string())
    }
}

impl AppError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a transport error.
    pub fn transport(message: impl fmt::Display) -> Self {
        Self::Transport(message.to_string())
    }

    /// Create a detail load error with the failing key.
    pub fn detail(key: impl Into<String>, reason: impl fmt::Display) -> Self {
        Self::DetailLoadFailed {
            key: key.into(),
            reason: reason.to_string(),
        }
    }

    /// Whether this error comes from the caller's input rather than upstream.
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::EmptyQuery | Self::EmptyKey)
    }
}
