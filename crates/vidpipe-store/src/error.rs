//! Store error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur against the asset record store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Asset not found: {0}")]
    NotFound(String),

    #[error("Asset already exists: {0}")]
    AlreadyExists(String),

    #[error("Storage backend failure: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }
}
