//! Error types for the persistence boundary

use thiserror::Error;

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;

/// Failures of the external record store.
///
/// None of these roll back the in-memory model: a failed write is logged and
/// the local state stays authoritative for the rest of the session.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The account does not exist in the store
    #[error("unknown account: {id}")]
    AccountNotFound { id: String },

    /// A store constraint was violated (duplicate id, bad reference)
    #[error("constraint violation: {message}")]
    Constraint { message: String },

    /// The store could not be reached
    #[error("store unavailable: {message}")]
    Unavailable { message: String },
}

impl StoreError {
    /// Create a constraint violation error
    pub fn constraint(message: impl Into<String>) -> Self {
        Self::Constraint {
            message: message.into(),
        }
    }

    /// Create an unavailable error
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }
}
