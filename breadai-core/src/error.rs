//! Error types for breadai-core
//!
//! Defines crate-internal error types using thiserror. Remote client errors
//! have their own taxonomy in [`crate::api::ApiError`] because HTTP status
//! mapping is part of the backend compatibility contract.

use thiserror::Error;

/// Convenience Result type using breadai-core Error
pub type Result<T> = std::result::Result<T, Error>;

/// Internal error type for configuration and persistence plumbing
///
/// Callers of the stats store never see these: persistence failures are
/// absorbed (load falls back to defaults, save is best-effort and logged).
#[derive(Error, Debug)]
pub enum Error {
    /// File I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Stats blob serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),
}
