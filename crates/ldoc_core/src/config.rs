//! Rendering configuration.

use std::fs;
use std::path::{Path, PathBuf};

use jsonc_parser::ParseOptions;
use ldoc_parser::{DEFAULT_MAX_DEPTH, ReadLimits};
use serde::{Deserialize, Serialize};

use crate::LdocError;

/// Widest HTML indent step accepted by [`LdocConfig::validate`].
pub const MAX_HTML_INDENT: usize = 16;

/// Output format produced by the emitters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Minimized JSON text.
    #[default]
    Json,
    /// An HTML page.
    Html,
    /// The object graph, printed as pretty JSON.
    Graph,
}

impl OutputFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Html => "html",
            Self::Graph => "graph",
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// HTML emitter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HtmlConfig {
    /// Spaces per nesting level.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

fn default_indent() -> usize {
    2
}

impl Default for HtmlConfig {
    fn default() -> Self {
        Self {
            indent: default_indent(),
        }
    }
}

/// Configuration for reading and rendering documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LdocConfig {
    /// Default output format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Maximum nesting depth accepted by the reader. `0` disables the check.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// HTML emitter settings.
    #[serde(default)]
    pub html: HtmlConfig,
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

impl Default for LdocConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LdocConfig {
    /// File names searched by [`LdocConfig::find_config`], in order.
    pub const CONFIG_FILES: [&'static str; 2] = [".ldoc.json", ".ldoc.jsonc"];

    /// Creates the default configuration.
    pub fn new() -> Self {
        Self {
            format: OutputFormat::default(),
            max_depth: default_max_depth(),
            html: HtmlConfig::default(),
        }
    }

    /// Loads configuration from a file.
    ///
    /// Supports `.ldoc.json` and `.ldoc.jsonc`; comments are allowed in both.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, LdocError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .map_err(|e| LdocError::config(format!("Failed to read config: {}", e)))?;

        Self::from_json(&content)
    }

    /// Parses configuration from a JSON (or JSONC) string and validates it.
    pub fn from_json(json: &str) -> Result<Self, LdocError> {
        let value = jsonc_parser::parse_to_serde_value(json, &ParseOptions::default())
            .map_err(|e| LdocError::config(format!("Invalid JSON: {}", e)))?
            .unwrap_or_else(|| serde_json::Value::Object(serde_json::Map::new()));

        let config: Self = serde_json::from_value(value)
            .map_err(|e| LdocError::config(format!("Invalid config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks value ranges that serde cannot express.
    pub fn validate(&self) -> Result<(), LdocError> {
        if self.html.indent > MAX_HTML_INDENT {
            return Err(LdocError::config(format!(
                "html.indent must be at most {}, got {}",
                MAX_HTML_INDENT, self.html.indent
            )));
        }
        Ok(())
    }

    /// Returns the first existing configuration file in `dir`.
    pub fn find_config(dir: impl AsRef<Path>) -> Option<PathBuf> {
        let dir = dir.as_ref();
        Self::CONFIG_FILES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.is_file())
    }

    /// Reader limits derived from `max_depth`.
    pub fn read_limits(&self) -> ReadLimits {
        match self.max_depth {
            0 => ReadLimits::unlimited(),
            depth => ReadLimits::new(Some(depth)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[test]
    fn test_config_new() {
        let config = LdocConfig::new();
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.max_depth, 128);
        assert_eq!(config.html.indent, 2);
    }

    #[test]
    fn test_config_from_json() {
        let json = r#"{
            // comments are fine
            "format": "html",
            "max_depth": 8,
            "html": { "indent": 4 }
        }"#;

        let config = LdocConfig::from_json(json).unwrap();
        assert_eq!(config.format, OutputFormat::Html);
        assert_eq!(config.max_depth, 8);
        assert_eq!(config.html.indent, 4);
        assert_eq!(config.read_limits(), ReadLimits::new(Some(8)));
    }

    #[test]
    fn test_config_partial_uses_defaults() {
        let config = LdocConfig::from_json(r#"{ "html": {} }"#).unwrap();
        assert_eq!(config, LdocConfig::new());

        let config = LdocConfig::from_json("").unwrap();
        assert_eq!(config, LdocConfig::new());
    }

    #[test]
    fn test_zero_depth_disables_limit() {
        let config = LdocConfig::from_json(r#"{ "max_depth": 0 }"#).unwrap();
        assert_eq!(config.read_limits(), ReadLimits::unlimited());
    }

    #[rstest]
    #[case::bad_json(r#"{ "format": "#, "Invalid JSON")]
    #[case::unknown_format(r#"{ "format": "pdf" }"#, "Invalid config")]
    #[case::type_mismatch(r#"{ "max_depth": "deep" }"#, "Invalid config")]
    #[case::indent_too_wide(r#"{ "html": { "indent": 17 } }"#, "html.indent must be at most 16")]
    fn test_config_errors(#[case] json: &str, #[case] expected_error_part: &str) {
        let err = LdocConfig::from_json(json).unwrap_err();
        assert!(
            err.to_string().contains(expected_error_part),
            "Error message '{}' should contain '{}'",
            err,
            expected_error_part
        );
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".ldoc.jsonc");
        std::fs::write(&path, r#"{ "format": "graph" }"#).unwrap();

        let config = LdocConfig::from_file(&path).unwrap();
        assert_eq!(config.format, OutputFormat::Graph);
    }

    #[test]
    fn test_from_file_missing() {
        let dir = tempfile::tempdir().unwrap();
        let err = LdocConfig::from_file(dir.path().join("nope.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }

    #[test]
    fn test_find_config_prefers_json() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(LdocConfig::find_config(dir.path()), None);

        std::fs::write(dir.path().join(".ldoc.jsonc"), "{}").unwrap();
        assert_eq!(
            LdocConfig::find_config(dir.path()),
            Some(dir.path().join(".ldoc.jsonc"))
        );

        std::fs::write(dir.path().join(".ldoc.json"), "{}").unwrap();
        assert_eq!(
            LdocConfig::find_config(dir.path()),
            Some(dir.path().join(".ldoc.json"))
        );
    }
}
