//! Error types for the ordering engine

use thiserror::Error;

/// Result type for engine operations
pub type Result<T> = std::result::Result<T, BoardError>;

/// Errors that can occur in the ordering engine.
///
/// Nothing here is fatal: callers log and continue with the best-known local
/// state. Missing import fields are defaulted rather than rejected, so they
/// never surface as errors at all.
#[derive(Debug, Error)]
pub enum BoardError {
    /// A move or edit referenced an id the model does not know.
    /// The intent is dropped without mutating anything.
    #[error("item not found: {id}")]
    ItemNotFound { id: String },

    /// JSON (de)serialization error on the import/export boundary
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl BoardError {
    /// Create an item-not-found error
    pub fn item_not_found(id: impl Into<String>) -> Self {
        Self::ItemNotFound { id: id.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BoardError::item_not_found("abc123");
        assert_eq!(err.to_string(), "item not found: abc123");
    }
}
