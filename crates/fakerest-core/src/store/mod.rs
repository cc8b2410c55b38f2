//! In-memory record storage.
//!
//! - [`Collection`]: ordered records of one resource with query and CRUD operations
//! - [`CollectionRegistry`]: named collections in registration order, owned by one server

mod collection;
mod error;
mod registry;

pub use collection::Collection;
pub(crate) use collection::into_record;
pub use error::CollectionError;
pub use registry::{CollectionRegistry, RegisteredCollection};
