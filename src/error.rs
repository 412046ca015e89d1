//! Error types for the fitter core
//!
//! Infrastructure failures only. Expected rejections (validation, not found)
//! are reported through outcome values, never through this enum.

use thiserror::Error;

// == Error Enum ==
/// Unified error type for collaborator and configuration failures.
#[derive(Error, Debug)]
pub enum Error {
    /// Persistence collaborator failed or is unavailable
    #[error("Storage error: {0}")]
    Storage(String),

    /// Key-value cache collaborator failed or is unavailable
    #[error("Cache error: {0}")]
    Cache(String),

    /// Cached bytes could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Configuration is inconsistent
    #[error("Configuration error: {0}")]
    Config(String),

    /// Request rejected by a collaborator before reaching storage
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// == Result Type Alias ==
/// Convenience Result type for the fitter core.
pub type Result<T> = std::result::Result<T, Error>;
