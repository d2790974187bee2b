//! Error types for weft.
//!
//! The per-frame path never fails. Errors only come out of
//! configuration, validation, export and lifecycle calls.

use thiserror::Error;

/// Unified error type for weft.
#[derive(Debug, Error)]
pub enum WeftError {
    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Image encoding failure.
    #[error("Image error: {0}")]
    Image(String),

    /// A lifecycle call arrived in the wrong state.
    #[error("Lifecycle error: {0}")]
    Lifecycle(String),
}

/// Convenience alias for `Result<T, WeftError>`.
pub type WeftResult<T> = Result<T, WeftError>;
