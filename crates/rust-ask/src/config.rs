//! Configuration types for rust-ask.
//!
//! This module defines configuration for the line reader and for logging.
//! Configuration is always passed explicitly; nothing here reads ambient
//! state unless asked to through [`AskConfig::from_env`] or
//! [`AskConfig::from_file`].

pub mod env;
pub mod file;

use serde::{Deserialize, Serialize};

pub use env::EnvConfig;
pub use file::ConfigFormat;

/// Default maximum length of one input line (64 KiB).
pub const DEFAULT_MAX_LINE_LENGTH: usize = 64 * 1024;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AskConfig {
    /// Line reader configuration.
    pub reader: ReaderConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,
}

impl AskConfig {
    /// Create a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum line length.
    #[must_use]
    pub const fn max_line_length(mut self, max: usize) -> Self {
        self.reader.max_line_length = max;
        self
    }

    /// Set the logging configuration.
    #[must_use]
    pub fn logging(mut self, logging: LoggingConfig) -> Self {
        self.logging = logging;
        self
    }

    /// Build a configuration from defaults overlaid with `ASK_*` variables.
    pub fn from_env() -> crate::Result<Self> {
        let mut config = Self::default();
        config.apply_env(&EnvConfig::default())?;
        Ok(config)
    }

    /// Overlay values found in the environment.
    pub fn apply_env(&mut self, env: &EnvConfig) -> crate::Result<()> {
        if let Some(raw) = env.get("MAX_LINE_LENGTH") {
            self.reader.max_line_length = raw.parse().map_err(|_| {
                crate::AskError::config(format!("invalid max line length: {raw}"))
            })?;
        }
        if let Some(level) = env.get("LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = env.get("LOG_FORMAT") {
            self.logging.format = format.parse()?;
        }
        self.validate()
    }

    /// Check the configuration for values the reader cannot work with.
    pub fn validate(&self) -> crate::Result<()> {
        if self.reader.max_line_length == 0 {
            return Err(crate::AskError::config("max_line_length must be non-zero"));
        }
        Ok(())
    }
}

/// Configuration for the line reader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    /// Maximum number of bytes accepted for one line, excluding the
    /// line terminator.
    pub max_line_length: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self {
            max_line_length: DEFAULT_MAX_LINE_LENGTH,
        }
    }
}

/// Configuration for logging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default level filter. `RUST_LOG` takes precedence when set.
    pub level: String,

    /// Output format.
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: DEFAULT_LOG_LEVEL.to_string(),
            format: LogFormat::default(),
        }
    }
}

impl LoggingConfig {
    /// Create a new logging configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the level filter.
    #[must_use]
    pub fn level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the output format.
    #[must_use]
    pub const fn format(mut self, format: LogFormat) -> Self {
        self.format = format;
        self
    }

    /// Install a global `tracing` subscriber for this configuration.
    ///
    /// Logs go to stderr so they never interleave with prompts on stdout.
    #[cfg(feature = "logging")]
    pub fn init(&self) -> crate::Result<()> {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env()
            .or_else(|_| EnvFilter::try_new(&self.level))
            .map_err(|e| crate::AskError::config(format!("invalid log level: {e}")))?;

        let builder = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr);

        let installed = match self.format {
            LogFormat::Compact => builder.compact().try_init(),
            LogFormat::Pretty => builder.pretty().try_init(),
            LogFormat::Json => builder.json().try_init(),
        };
        installed.map_err(|e| crate::AskError::config(format!("logging already initialized: {e}")))
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Single-line human readable output.
    #[default]
    Compact,
    /// Multi-line human readable output.
    Pretty,
    /// Newline-delimited JSON.
    Json,
}

impl std::str::FromStr for LogFormat {
    type Err = crate::AskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(crate::AskError::config(format!("unknown log format: {other}"))),
        }
    }
}
