//! # AppError
//!
//! Centralized error handling for the kairanban crates.
//! Every failure is local and recoverable; callers surface a message and
//! leave the store untouched.

use thiserror::Error;

/// The primary error type for all kb-core operations.
#[derive(Error, Debug)]
pub enum AppError {
    /// Resource not found (e.g., a post id deleted by another writer)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// Validation failure (e.g., empty title or body on creation)
    #[error("validation error: {0}")]
    ValidationError(String),

    /// Permission failure (e.g., a guest reacting, a member deleting)
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Malformed stored or imported JSON
    #[error("malformed document: {0}")]
    Parse(#[from] serde_json::Error),

    /// Underlying store failure (e.g., unreadable data directory)
    #[error("storage error: {0}")]
    Storage(String),
}

/// A specialized Result type for kairanban logic.
pub type Result<T> = std::result::Result<T, AppError>;
