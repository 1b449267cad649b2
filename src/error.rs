//! # Error Types
//!
//! This module defines error types used throughout the slabel library.

use thiserror::Error;

/// Main error type for slabel operations
#[derive(Debug, Error)]
pub enum SlabelError {
    /// Storage backend failure (read/write of a persisted key)
    #[error("Storage error: {0}")]
    Storage(String),

    /// Import file could not be parsed or has the wrong shape
    #[error("Import error: {0}")]
    Import(String),

    /// Invalid value supplied by the user
    #[error("Invalid input: {0}")]
    Validation(String),

    /// Network-level errors (bind, serve)
    #[error("Transport error: {0}")]
    Transport(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
