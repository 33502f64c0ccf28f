//! Configuration section types.

use serde::{Deserialize, Serialize};
use tollway_telemetry::{LogConfig, MetricsConfig};

/// Default request body limit (1 MiB).
pub const DEFAULT_MAX_BODY_BYTES: usize = 1024 * 1024;

/// Application section.
///
/// # Example
///
/// ```
/// use tollway_config::AppConfig;
///
/// let config = AppConfig::default();
/// assert_eq!(config.title, "Tollway");
/// assert!(config.validate_responses);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Application title, used as the service name in logs.
    #[serde(default = "default_title")]
    pub title: String,

    /// Largest accepted request body, in bytes.
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,

    /// Validate handler results against the declared response type.
    #[serde(default = "default_true")]
    pub validate_responses: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            max_body_bytes: default_max_body_bytes(),
            validate_responses: true,
        }
    }
}

fn default_title() -> String {
    "Tollway".to_string()
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

fn default_true() -> bool {
    true
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs (production).
    #[default]
    Json,
    /// Human-readable pretty format (development).
    Pretty,
}

/// Logging section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include source file and line in logs.
    #[serde(default)]
    pub file_line_info: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            file_line_info: false,
        }
    }
}

impl LoggingConfig {
    /// Converts to the telemetry crate's logging setup.
    #[must_use]
    pub fn to_log_config(&self, service_name: &str) -> LogConfig {
        let base = match self.format {
            LogFormat::Json => LogConfig::production(),
            LogFormat::Pretty => LogConfig::development(),
        };
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            file_line_info: self.file_line_info,
            ..base
        }
        .with_service_name(service_name)
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Metrics section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct MetricsSection {
    /// Install the Prometheus recorder.
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for MetricsSection {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsSection {
    /// Converts to the telemetry crate's metrics setup.
    #[must_use]
    pub fn to_metrics_config(&self) -> MetricsConfig {
        MetricsConfig {
            enabled: self.enabled,
            ..MetricsConfig::default()
        }
    }
}

/// Log levels accepted by [`LoggingConfig::level`].
pub const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];
