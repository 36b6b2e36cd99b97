//! File-based configuration loading.

use std::path::Path;

use super::AskConfig;
use crate::error::{AskError, Result};

/// Configuration file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML format.
    Toml,
    /// JSON format.
    Json,
}

impl ConfigFormat {
    /// Detect format from file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "toml" => Some(Self::Toml),
            "json" => Some(Self::Json),
            _ => None,
        }
    }

    /// Detect format from path.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

impl AskConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)
            .map_err(|e| AskError::config(format!("invalid TOML: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a JSON document. Missing keys keep their defaults.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(content)
            .map_err(|e| AskError::config(format!("invalid JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse a document in the given format.
    pub fn parse(content: &str, format: ConfigFormat) -> Result<Self> {
        match format {
            ConfigFormat::Toml => Self::from_toml_str(content),
            ConfigFormat::Json => Self::from_json_str(content),
        }
    }

    /// Load a configuration file, detecting the format from its extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| {
            AskError::config(format!("unknown config format: {}", path.display()))
        })?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| AskError::io_context(format!("reading {}", path.display()), e))?;
        Self::parse(&content, format)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| AskError::config(format!("serializing TOML: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogFormat;

    #[test]
    fn parse_toml_sections() {
        let content = r#"
            [reader]
            max_line_length = 256

            [logging]
            level = "debug"
            format = "json"
        "#;
        let config = AskConfig::from_toml_str(content).unwrap();
        assert_eq!(config.reader.max_line_length, 256);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = AskConfig::from_json_str(r#"{"logging": {"level": "warn"}}"#).unwrap();
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.reader, crate::config::ReaderConfig::default());
    }

    #[test]
    fn format_detection() {
        assert_eq!(ConfigFormat::from_extension("TOML"), Some(ConfigFormat::Toml));
        assert_eq!(
            ConfigFormat::from_path(Path::new("ask.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("ask.yaml")), None);
    }

    #[test]
    fn invalid_documents_are_config_errors() {
        assert!(matches!(
            AskConfig::from_toml_str("reader = 3"),
            Err(AskError::Config { .. })
        ));
        assert!(matches!(
            AskConfig::from_toml_str("[reader]\nmax_line_length = 0"),
            Err(AskError::Config { .. })
        ));
    }
}
