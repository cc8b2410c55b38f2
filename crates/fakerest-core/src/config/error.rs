//! Error types for configuration and fixture loading.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration loading error
#[derive(Debug, Error)]
pub enum ConfigError {
    /// JSON (or comment-stripped JSONC) parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),
    /// File could not be read
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Malformed glob pattern
    #[error("Invalid fixture pattern: {0}")]
    Pattern(#[from] glob::PatternError),
    /// Path matched by a glob could not be inspected
    #[error("Failed to expand fixture pattern: {0}")]
    Glob(#[from] glob::GlobError),
    /// Extension is not one of json, jsonc, yaml, yml
    #[error("Unknown file type: {0}")]
    UnknownFileType(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::error::Error;

    #[rstest]
    fn test_json_error_display_and_source() {
        let json_err = serde_json::from_str::<serde_json::Value>("invalid json").unwrap_err();
        let error = ConfigError::from(json_err);
        assert!(error.to_string().starts_with("JSON parsing error"));
        assert!(error.source().is_some());
    }

    #[rstest]
    fn test_yaml_error_display() {
        let yaml_err = serde_yaml::from_str::<serde_yaml::Value>("invalid: yaml: [").unwrap_err();
        let error: ConfigError = yaml_err.into();
        assert!(matches!(error, ConfigError::Yaml(_)));
        assert!(error.to_string().starts_with("YAML parsing error"));
    }

    #[rstest]
    fn test_io_error_names_path() {
        let error = ConfigError::Io {
            path: PathBuf::from("fixtures/missing.json"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(error.to_string(), "Failed to read fixtures/missing.json: gone");
        assert!(error.source().is_some());
    }

    #[rstest]
    fn test_pattern_error_from_glob() {
        let pattern_err = glob::Pattern::new("[").unwrap_err();
        let error = ConfigError::from(pattern_err);
        assert!(error.to_string().starts_with("Invalid fixture pattern"));
    }

    #[rstest]
    #[case("test.txt")]
    #[case("unknown.extension")]
    #[case("")]
    fn test_unknown_file_type_display(#[case] path: &str) {
        let error = ConfigError::UnknownFileType(path.to_string());
        assert_eq!(error.to_string(), format!("Unknown file type: {}", path));
        assert!(error.source().is_none());
    }
}
