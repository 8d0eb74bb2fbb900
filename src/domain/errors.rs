//! Domain error types
//!
//! This module defines the error hierarchy for the mock service.
//! Request-level failures (bad credentials, invalid uploads, missing parameters) are
//! never errors: they are answered with ODM documents. `MockError` covers the
//! process-level failures around them (configuration, I/O, serialization, serving).

use thiserror::Error;

/// Main error type
///
/// This is the primary error type used throughout the application.
#[derive(Debug, Error)]
pub enum MockError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Serialization errors (XML, CSV, JSON)
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// HTTP server errors (bind, serve)
    #[error("Server error: {0}")]
    Server(String),
}

// Conversion from std::io::Error
impl From<std::io::Error> for MockError {
    fn from(err: std::io::Error) -> Self {
        MockError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for MockError {
    fn from(err: serde_json::Error) -> Self {
        MockError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for MockError {
    fn from(err: toml::de::Error) -> Self {
        MockError::Configuration(format!("TOML parse error: {err}"))
    }
}

impl From<csv::Error> for MockError {
    fn from(err: csv::Error) -> Self {
        MockError::Serialization(format!("CSV error: {err}"))
    }
}

impl From<std::string::FromUtf8Error> for MockError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        MockError::Serialization(format!("Output is not valid UTF-8: {err}"))
    }
}
