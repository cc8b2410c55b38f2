//! Errors surfaced by the server to the host.

use crate::query::QueryError;
use crate::store::CollectionError;
use thiserror::Error;

/// Failure of a server operation or of handling a request.
///
/// A missing identifier on an item route never reaches the host as an error:
/// it is answered with a bare `404` instead.
#[derive(Debug, Error)]
pub enum ServerError {
    /// Malformed query string parameter
    #[error(transparent)]
    Query(#[from] QueryError),
    /// Collection operation failed
    #[error(transparent)]
    Collection(#[from] CollectionError),
    /// No collection is registered under the name
    #[error("Unknown collection: {name}")]
    UnknownCollection { name: String },
    /// Response body could not be serialized
    #[error("failed to serialize response body: {0}")]
    Serialize(#[source] serde_json::Error),
}
