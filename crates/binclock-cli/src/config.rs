//! Configuration file for the `binclock` binary.
//!
//! The file is optional YAML. Every key has a default, so an empty file and
//! a missing file behave the same:
//!
//! ```yaml
//! display:
//!   mode: emoji          # emoji | binary | json | compact | raw
//!   clear_screen: true
//! refresh:
//!   interval_ms: 1000
//! registry:
//!   capacity: 16
//! logging:
//!   level: warn
//!   format: text         # text | json
//! ```

use std::path::Path;

use binclock_core::{DEFAULT_CAPACITY, DisplayMode};
use serde::Deserialize;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },

    /// A value parsed but is outside its allowed range.
    #[error("invalid config value for {field}: {reason}")]
    Invalid {
        /// Dotted path of the offending key.
        field: &'static str,
        /// Why the value was rejected.
        reason: &'static str,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClockConfig {
    /// Output layout settings.
    #[serde(default)]
    pub display: DisplayConfig,

    /// Refresh-loop cadence.
    #[serde(default)]
    pub refresh: RefreshConfig,

    /// Display registry sizing.
    #[serde(default)]
    pub registry: RegistryConfig,

    /// Log filter and output format.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ClockConfig {
    /// Load and validate configuration from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read,
    /// [`ConfigError::Yaml`] if it is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML, or
    /// [`ConfigError::Invalid`] if a value is out of range.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.refresh.interval_ms == 0 {
            return Err(ConfigError::Invalid {
                field: "refresh.interval_ms",
                reason: "must be at least 1",
            });
        }
        if self.registry.capacity == 0 {
            return Err(ConfigError::Invalid {
                field: "registry.capacity",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }
}

/// Output layout settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DisplayConfig {
    /// Layout used when `--display` is not given.
    #[serde(default)]
    pub mode: DisplayMode,

    /// Clear the terminal before each refresh. Never applied to JSON output.
    #[serde(default = "default_true")]
    pub clear_screen: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            mode: DisplayMode::default(),
            clear_screen: true,
        }
    }
}

/// Refresh-loop cadence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RefreshConfig {
    /// Milliseconds between refreshes.
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
        }
    }
}

/// Display registry sizing.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RegistryConfig {
    /// Maximum simultaneous renderers.
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Log filter and output format.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive (trace, debug, info, warn, error).
    /// `RUST_LOG` takes precedence when set.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format on stderr.
    #[serde(default)]
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

const fn default_true() -> bool {
    true
}

const fn default_interval_ms() -> u64 {
    1000
}

const fn default_capacity() -> usize {
    DEFAULT_CAPACITY
}

fn default_log_level() -> String {
    "warn".to_owned()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = ClockConfig::default();
        assert_eq!(config.display.mode, DisplayMode::Emoji);
        assert!(config.display.clear_screen);
        assert_eq!(config.refresh.interval_ms, 1000);
        assert_eq!(config.registry.capacity, 16);
        assert_eq!(config.logging.level, "warn");
        assert_eq!(config.logging.format, LogFormat::Text);
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r"
display:
  mode: compact
  clear_screen: false
refresh:
  interval_ms: 250
registry:
  capacity: 4
logging:
  level: debug
  format: json
";
        let config = ClockConfig::parse(yaml).unwrap();
        assert_eq!(config.display.mode, DisplayMode::Compact);
        assert!(!config.display.clear_screen);
        assert_eq!(config.refresh.interval_ms, 250);
        assert_eq!(config.registry.capacity, 4);
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn parse_partial_yaml_keeps_other_defaults() {
        let config = ClockConfig::parse("display:\n  mode: raw\n").unwrap();
        assert_eq!(config.display.mode, DisplayMode::Raw);
        assert!(config.display.clear_screen);
        assert_eq!(config.refresh.interval_ms, 1000);
    }

    #[test]
    fn parse_empty_yaml() {
        assert_eq!(ClockConfig::parse("").unwrap(), ClockConfig::default());
    }

    #[test]
    fn unknown_mode_is_a_yaml_error() {
        assert!(matches!(
            ClockConfig::parse("display:\n  mode: sundial\n"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn zero_values_are_rejected() {
        assert!(matches!(
            ClockConfig::parse("refresh:\n  interval_ms: 0\n"),
            Err(ConfigError::Invalid {
                field: "refresh.interval_ms",
                ..
            })
        ));
        assert!(matches!(
            ClockConfig::parse("registry:\n  capacity: 0\n"),
            Err(ConfigError::Invalid {
                field: "registry.capacity",
                ..
            })
        ));
    }

    #[test]
    fn unreadable_file_is_an_io_error() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("no-such-binclock.yaml");
        assert!(matches!(
            ClockConfig::from_file(&path),
            Err(ConfigError::Io { .. })
        ));
    }
}
