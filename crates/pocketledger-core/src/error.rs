use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for the ledger core.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Malformed input rejected at the store boundary. Always recoverable;
    /// the store guarantees no partial mutation occurred.
    #[error("Validation failed: {0}")]
    Validation(String),
    /// A persistence-provider failure, propagated unchanged.
    #[error("Storage error: {0}")]
    Storage(String),
}

pub type Result<T> = StdResult<T, CoreError>;

impl From<std::io::Error> for CoreError {
    fn from(err: std::io::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for CoreError {
    fn from(err: serde_json::Error) -> Self {
        CoreError::Storage(err.to_string())
    }
}
