//! The root configuration type.

use serde::{Deserialize, Serialize};
use tollway_telemetry::TelemetryConfig;

use crate::schema::{AppConfig, LogFormat, LoggingConfig, MetricsSection, LOG_LEVELS};
use crate::ConfigError;

/// Complete Tollway application configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use tollway_config::TollwayConfig;
///
/// let config = TollwayConfig::default();
/// assert_eq!(config.app.max_body_bytes, 1024 * 1024);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct TollwayConfig {
    /// Application settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Metrics settings.
    #[serde(default)]
    pub metrics: MetricsSection,
}

impl TollwayConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - `app.max_body_bytes` is zero
    /// - `app.title` is empty
    /// - `logging.level` is not a known level
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.app.max_body_bytes == 0 {
            return Err(ConfigError::invalid_value(
                "app.max_body_bytes",
                "must be greater than zero",
            ));
        }

        if self.app.title.trim().is_empty() {
            return Err(ConfigError::invalid_value("app.title", "must not be empty"));
        }

        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::invalid_value(
                "logging.level",
                format!(
                    "unknown level '{}', expected one of {}",
                    self.logging.level,
                    LOG_LEVELS.join(", ")
                ),
            ));
        }

        Ok(())
    }

    /// Local development preset: pretty debug logs with source locations.
    #[must_use]
    pub fn development() -> Self {
        let mut config = Self::default();
        config.logging.level = "debug".to_string();
        config.logging.format = LogFormat::Pretty;
        config.logging.file_line_info = true;
        config
    }

    /// Production preset: JSON logs at info level.
    #[must_use]
    pub fn production() -> Self {
        let mut config = Self::default();
        config.logging.level = "info".to_string();
        config.logging.format = LogFormat::Json;
        config
    }

    /// Builds the telemetry setup, naming the service after the app title.
    #[must_use]
    pub fn telemetry(&self) -> TelemetryConfig {
        TelemetryConfig {
            logging: self.logging.to_log_config(&self.app.title),
            metrics: self.metrics.to_metrics_config(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(TollwayConfig::default().validate().is_ok());
    }

    #[test]
    fn test_zero_body_limit_is_invalid() {
        let mut config = TollwayConfig::default();
        config.app.max_body_bytes = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("app.max_body_bytes"));
    }

    #[test]
    fn test_unknown_level_is_invalid() {
        let mut config = TollwayConfig::default();
        config.logging.level = "loud".to_string();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("unknown level 'loud'"));

        config.logging.level = "WARN".to_string();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_presets() {
        let dev = TollwayConfig::development();
        assert_eq!(dev.logging.format, LogFormat::Pretty);
        assert_eq!(dev.logging.level, "debug");

        let prod = TollwayConfig::production();
        assert_eq!(prod.logging.format, LogFormat::Json);
        assert!(!prod.logging.file_line_info);
    }

    #[test]
    fn test_telemetry_uses_title_as_service_name() {
        let mut config = TollwayConfig::development();
        config.app.title = "Items API".to_string();
        let telemetry = config.telemetry();
        assert_eq!(telemetry.logging.service_name, "Items API");
        assert!(!telemetry.logging.json_format);
        assert!(telemetry.metrics.enabled);
    }
}
