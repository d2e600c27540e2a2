// src/error.rs

//! Unified error handling for the cookbook application.

use thiserror::Error;

/// Result type alias for cookbook operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// Field pattern failed to compile
    #[error("Invalid pattern for field '{field}': {message}")]
    Pattern { field: String, message: String },

    /// Wiki API answered with something we cannot use
    #[error("API error: {0}")]
    Api(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// No titles to choose from
    #[error("Corpus contains no recipes")]
    EmptyCorpus,
}

impl AppError {
    /// Create a pattern compilation error.
    pub fn pattern(field: impl Into<String>, message: impl std::fmt::Display) -> Self {
        Self::Pattern {
            field: field.into(),
            message: message.to_string(),
        }
    }

    /// Create an API response error.
    pub fn api(message: impl Into<String>) -> Self {
        Self::Api(message.into())
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
