//! Errors raised while decoding query parameters.

use thiserror::Error;

/// Query-string value that cannot be decoded or interpreted.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A value starting with `[` or `{` is not valid JSON
    #[error("invalid JSON in query parameter '{key}': {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    /// A recognized parameter has the wrong shape
    #[error("invalid query parameter '{key}': {reason}")]
    InvalidParameter { key: String, reason: String },
}

impl QueryError {
    pub(crate) fn invalid(key: &str, reason: impl Into<String>) -> Self {
        QueryError::InvalidParameter {
            key: key.to_string(),
            reason: reason.into(),
        }
    }
}
