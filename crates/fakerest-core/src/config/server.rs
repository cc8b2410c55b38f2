//! Declarative server and collection configuration.

use crate::types::record::DEFAULT_IDENTIFIER;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Server settings plus the collections to seed it with.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ServerConfig {
    /// Prefix of every resource URL, e.g. `http://localhost:3000`
    #[serde(default)]
    pub base_url: String,
    /// Emit a diagnostic event per delivered response
    #[serde(default)]
    pub logging: bool,
    #[serde(default)]
    pub collections: Vec<CollectionConfig>,
}

/// One named collection and its seed records.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CollectionConfig {
    /// Resource name, the first path segment after the base URL
    pub name: String,
    /// Field holding each record's identifier
    #[serde(default = "default_identifier")]
    pub identifier: String,
    #[serde(default)]
    pub records: Vec<Value>,
}

fn default_identifier() -> String {
    DEFAULT_IDENTIFIER.to_string()
}
