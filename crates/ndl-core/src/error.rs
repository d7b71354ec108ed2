//! # Error Types
//!
//! Shared error type for the NUTS datalake crates, derived with `thiserror`.
//!
//! ## Design
//!
//! Remote-data failures (catalog or partition sources) are NOT represented
//! here: by policy they degrade to empty collections at the loading
//! boundary and never propagate as errors. What remains is operator input
//! (configuration), malformed identifiers, and IO.

use thiserror::Error;

/// Top-level error type for the NUTS datalake.
#[derive(Error, Debug)]
pub enum NdlError {
    /// Input could not be normalized into a region code.
    #[error("invalid region code: {0:?}")]
    InvalidRegionCode(String),

    /// Configuration file was present but malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
