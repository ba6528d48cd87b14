//! Storage-specific error types for the JSON snapshot backend.
//!
//! These errors are internal to the storage layer and are converted to
//! `ledgerfolio_core::Error` before being returned to callers.

use ledgerfolio_core::errors::Error;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    /// The snapshot parsed but references are inconsistent.
    #[error("Snapshot integrity check failed: {0}")]
    Integrity(String),
}

impl From<StorageError> for Error {
    fn from(err: StorageError) -> Self {
        Error::Repository(err.to_string())
    }
}
