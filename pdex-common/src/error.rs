//! Common error types for pdex

use std::path::Path;
use thiserror::Error;

/// Common result type for pdex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error kinds shared by the catalog pipeline
#[derive(Error, Debug)]
pub enum Error {
    /// Remote page unreachable, timed out, or returned a non-success status
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Single candidate image could not be downloaded or was rejected
    #[error("Image download error: {0}")]
    ImageDownload(String),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed or missing input, reported before any side effect
    #[error("Validation error: {0}")]
    Validation(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Metadata record (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Wrap an I/O error with the action and path that produced it
    pub fn io_at(action: &str, path: &Path, err: std::io::Error) -> Self {
        Error::Io(std::io::Error::new(
            err.kind(),
            format!("Failed to {} {}: {}", action, path.display(), err),
        ))
    }
}
