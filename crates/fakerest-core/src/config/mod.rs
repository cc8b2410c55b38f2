//! Server configuration and collection fixtures loaded from JSON, JSONC or YAML files.

mod error;
mod parser;
mod server;

pub use error::ConfigError;
pub use parser::{load_config, load_fixtures, strip_json_comments, FileFormat};
pub use server::{CollectionConfig, ServerConfig};
