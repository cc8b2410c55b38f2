//! Query-string decoding and typed collection queries.

mod decoder;
mod error;
mod params;

pub use decoder::{decode_query_string, QueryParams, QueryValue};
pub use error::QueryError;
pub use params::{Query, Sort, SortDirection, Window};
