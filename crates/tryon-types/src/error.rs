//! Error types for the tryon pipeline.
//!
//! All crates return `TryOnResult<T>` from fallible operations.
//! Numeric degeneracies (zero-length edges, degenerate projected triangles)
//! are absorbed locally and never surface here.

use thiserror::Error;

/// Unified error type for the tryon pipeline.
#[derive(Debug, Error)]
pub enum TryOnError {
    /// A garment was submitted for simulation without a mesh.
    #[error("Garment has no mesh")]
    NoMesh,

    /// Mesh data is malformed or inconsistent.
    #[error("Invalid mesh: {0}")]
    InvalidMesh(String),

    /// Configuration value is invalid.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A component was used before it had what it needs to run.
    #[error("Not initialized: {0}")]
    NotInitialized(String),

    /// A frame or garment operation arrived while the session is stopped.
    #[error("Session has not been started")]
    SessionNotStarted,

    /// The garment handle or registry id is not known.
    #[error("Unknown garment: {0}")]
    UnknownGarment(String),

    /// Pixel buffer length does not match its declared dimensions.
    #[error("Image buffer is {actual} bytes, expected {expected} for {width}x{height} RGBA")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization failure.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Convenience alias for `Result<T, TryOnError>`.
pub type TryOnResult<T> = Result<T, TryOnError>;
