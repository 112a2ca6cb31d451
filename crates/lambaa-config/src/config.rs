//! Configuration types.

use lambaa_telemetry::LogConfig;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Levels accepted in `logging.level`, alone or as `target=level` directives.
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

/// Complete configuration for a Lambaa function.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and the
/// environment.
///
/// # Example
///
/// ```
/// use lambaa_config::LambaaConfig;
///
/// let config = LambaaConfig::default();
/// assert!(!config.router.debug);
/// assert_eq!(config.logging.level, "info");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct LambaaConfig {
    /// Router behaviour.
    #[serde(default)]
    pub router: RouterSection,

    /// Log output.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl LambaaConfig {
    /// Checks values that deserialize but make no sense.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an unknown log level.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let level = self.logging.level.trim();
        if level.is_empty() {
            return Err(ConfigError::invalid_value("logging.level", "must not be empty"));
        }

        for directive in level.split(',') {
            let name = directive.rsplit('=').next().unwrap_or(directive).trim();
            if !LOG_LEVELS.iter().any(|known| known.eq_ignore_ascii_case(name)) {
                return Err(ConfigError::invalid_value(
                    "logging.level",
                    format!("unknown log level '{name}'"),
                ));
            }
        }

        Ok(())
    }

    /// Local development: debug routing lines and pretty output.
    #[must_use]
    pub fn development() -> Self {
        Self {
            router: RouterSection { debug: true },
            logging: LoggingConfig {
                level: "debug".to_string(),
                format: LogFormat::Pretty,
                include_location: true,
                ..LoggingConfig::default()
            },
        }
    }

    /// Deployed functions: JSON output at info level.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }
}

/// Router settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct RouterSection {
    /// Log a line describing where each event is routed.
    #[serde(default)]
    pub debug: bool,
}

/// Log output format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// One JSON object per line.
    #[default]
    Json,
    /// Human-readable output.
    Pretty,
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Install a subscriber at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Level or filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            include_location: false,
        }
    }
}

impl From<&LoggingConfig> for LogConfig {
    fn from(config: &LoggingConfig) -> Self {
        Self {
            enabled: config.enabled,
            level: config.level.clone(),
            json_format: config.format == LogFormat::Json,
            span_events: false,
            file_line_info: config.include_location,
            include_target: true,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_log_level() -> String {
    "info".to_string()
}
