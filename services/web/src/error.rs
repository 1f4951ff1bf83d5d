//! services/web/src/error.rs
//!
//! Defines the primary error type for the web service.

use crate::config::ConfigError;

/// The primary error type for the `web` service.
#[derive(Debug, thiserror::Error)]
pub enum WebError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Represents a failure while building the HTTP client for the backend.
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    /// Represents a standard Input/Output error (e.g., binding to a network socket).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
