//! In-memory fake REST backend.
//!
//! `fakerest-core` answers HTTP-like requests from named in-memory collections so that
//! client code can be exercised in tests without a real server:
//! - [`store`]: collections with filter/sort/slice queries and identifier allocation
//! - [`query`]: query-string decoding into typed query parameters
//! - [`server`]: routing, interceptor pipeline and REST response metadata
//! - [`config`]: server and fixture loading from JSON/JSONC/YAML files

pub mod config;
pub mod matching;
pub mod query;
pub mod server;
pub mod store;
pub mod types;

pub use query::{decode_query_string, Query, QueryError, QueryParams, QueryValue};
pub use server::{Exchange, FakeRequest, FakeServer, ServerError};
pub use store::{Collection, CollectionError, CollectionRegistry};
pub use types::record::Record;
pub use types::request::RequestContext;
pub use types::response::ResponseContext;
