//! Resource path matching: `<base_url>/<name>` and `<base_url>/<name>/<identifier>`.

use regex::Regex;

/// Result of matching a URL against a resource pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceMatch {
    /// Matched resource name
    pub name: String,
    /// Percent-decoded identifier segment, `None` for collection URLs
    pub identifier: Option<String>,
}

/// Compiled path matcher for one registered resource name.
///
/// Both the base URL and the name are matched literally; regex metacharacters
/// in either never change what the pattern accepts.
#[derive(Debug, Clone)]
pub struct ResourcePattern {
    name: String,
    regex: Regex,
}

impl ResourcePattern {
    /// Compile the matcher. Fails only when the escaped pattern exceeds the
    /// regex size limit, e.g. for an extremely long name.
    pub fn new(base_url: &str, name: &str) -> Result<Self, regex::Error> {
        let base = base_url.trim_end_matches('/');
        let pattern = format!(
            "^{}/{}(?:/([^/]+))?$",
            regex::escape(base),
            regex::escape(name)
        );
        Ok(Self {
            name: name.to_string(),
            regex: Regex::new(&pattern)?,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Match a request URL; the query string and a trailing `/` are ignored.
    pub fn matches(&self, url: &str) -> Option<ResourceMatch> {
        let path = normalize_path(url);
        let caps = self.regex.captures(path)?;
        let identifier = caps.get(1).map(|m| {
            urlencoding::decode(m.as_str())
                .map(|s| s.into_owned())
                .unwrap_or_else(|_| m.as_str().to_string())
        });
        Some(ResourceMatch {
            name: self.name.clone(),
            identifier,
        })
    }
}

fn normalize_path(url: &str) -> &str {
    let without_query = url.split(['?', '#']).next().unwrap_or("");
    let trimmed = without_query.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}
