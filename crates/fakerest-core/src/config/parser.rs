//! Configuration and fixture files: format detection, parsing and glob loading.

use crate::config::error::ConfigError;
use crate::config::server::{CollectionConfig, ServerConfig};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Serialization format of a config or fixture file, chosen by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    /// JSON with `//` and `/* */` comments
    Jsonc,
    Yaml,
}

impl FileFormat {
    /// Format for `path` from its (case-insensitive) extension.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(FileFormat::Json),
            Some("jsonc") => Ok(FileFormat::Jsonc),
            Some("yaml" | "yml") => Ok(FileFormat::Yaml),
            _ => Err(ConfigError::UnknownFileType(
                path.to_string_lossy().into_owned(),
            )),
        }
    }

    /// Deserialize `content` written in this format.
    pub fn parse<T: DeserializeOwned>(self, content: &str) -> Result<T, ConfigError> {
        let parsed = match self {
            FileFormat::Json => serde_json::from_str(content)?,
            FileFormat::Jsonc => serde_json::from_str(&strip_json_comments(content))?,
            FileFormat::Yaml => serde_yaml::from_str(content)?,
        };
        Ok(parsed)
    }
}

/// Strip `//` and `/* */` comments from JSONC content, leaving string literals intact.
pub fn strip_json_comments(content: &str) -> String {
    let mut result = String::with_capacity(content.len());
    let mut chars = content.chars().peekable();
    let mut in_string = false;
    let mut escaped = false;

    while let Some(c) = chars.next() {
        if in_string {
            result.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                result.push(c);
            }
            ('/', Some('/')) => {
                // line comment keeps its terminating newline
                while let Some(&next) = chars.peek() {
                    if next == '\n' || next == '\r' {
                        break;
                    }
                    chars.next();
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut previous = '\0';
                for next in chars.by_ref() {
                    if previous == '*' && next == '/' {
                        break;
                    }
                    previous = next;
                }
            }
            _ => result.push(c),
        }
    }

    result
}

fn read_file<T: DeserializeOwned>(path: &Path) -> Result<T, ConfigError> {
    let format = FileFormat::from_path(path)?;
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    format.parse(&content)
}

/// Load a [`ServerConfig`] from a single file.
pub fn load_config(path: impl AsRef<Path>) -> Result<ServerConfig, ConfigError> {
    let path = path.as_ref();
    let config: ServerConfig = read_file(path)?;
    tracing::debug!(
        path = %path.display(),
        collections = config.collections.len(),
        "Loaded server config"
    );
    Ok(config)
}

/// A fixture file holds either one collection or a list of them.
#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    Many(Vec<CollectionConfig>),
    One(CollectionConfig),
}

/// Load collection fixtures from every file matching a glob pattern.
///
/// Files are read in sorted path order and their collections concatenated.
/// A pattern matching nothing yields an empty list.
pub fn load_fixtures(pattern: &str) -> Result<Vec<CollectionConfig>, ConfigError> {
    let mut paths = glob::glob(pattern)?.collect::<Result<Vec<PathBuf>, _>>()?;
    paths.sort();

    let mut collections = Vec::new();
    for path in paths {
        if path.is_dir() {
            continue;
        }
        match read_file::<FixtureFile>(&path)? {
            FixtureFile::Many(many) => collections.extend(many),
            FixtureFile::One(one) => collections.push(one),
        }
        tracing::trace!(path = %path.display(), "Loaded fixture file");
    }
    Ok(collections)
}
