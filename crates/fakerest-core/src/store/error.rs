//! Errors returned by collection operations.

use crate::types::record::identifier_to_string;
use serde_json::Value;
use thiserror::Error;

/// Errors that can occur while reading or mutating a collection
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CollectionError {
    /// No record holds the identifier
    #[error("No item with identifier {}", identifier_to_string(.identifier))]
    NotFound { identifier: Value },
    /// A live record already holds the identifier
    #[error("An item with the identifier {} already exists", identifier_to_string(.identifier))]
    DuplicateIdentifier { identifier: Value },
    /// Value supplied as a record is not a JSON object
    #[error("Record must be a JSON object, got {found}")]
    InvalidRecord { found: String },
    /// The largest numeric identifier is `i64::MAX`, so none can be allocated
    #[error("Cannot allocate an identifier after {max}")]
    IdentifierExhausted { max: i64 },
    /// Resource name cannot be compiled into a path matcher
    #[error("Invalid collection name '{name}': {reason}")]
    InvalidName { name: String, reason: String },
}

impl CollectionError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, CollectionError::NotFound { .. })
    }
}
