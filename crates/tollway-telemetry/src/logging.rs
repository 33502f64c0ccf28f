//! Structured logging for Tollway.
//!
//! Logging goes through `tracing`. [`init_logging`] installs a
//! `tracing-subscriber` registry with either a JSON layer (production) or a
//! pretty layer (development), filtered by an `EnvFilter` directive.
//!
//! # Example
//!
//! ```rust,no_run
//! use tollway_telemetry::logging::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development()).unwrap();
//!
//! tracing::info!(route.name = "read_item", "Dispatching request");
//! ```

use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, Registry};

use crate::error::TelemetryError;
use crate::TelemetryResult;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// Whether logging is enabled.
    pub enabled: bool,

    /// Filter directive (e.g., "info", "tollway=debug").
    pub level: String,

    /// Whether to output JSON.
    pub json_format: bool,

    /// Whether to include span events (new, close).
    pub span_events: bool,

    /// Whether to include file/line info.
    pub file_line_info: bool,

    /// Whether to include thread IDs.
    pub thread_ids: bool,

    /// Whether to include the target (module path).
    pub include_target: bool,

    /// Service name attached to the startup event.
    pub service_name: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LogConfig {
    /// Human-readable output at debug level.
    #[must_use]
    pub fn development() -> Self {
        Self {
            enabled: true,
            level: "debug".to_string(),
            json_format: false,
            span_events: true,
            file_line_info: true,
            thread_ids: false,
            include_target: true,
            service_name: "tollway".to_string(),
        }
    }

    /// JSON output at info level.
    #[must_use]
    pub fn production() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            json_format: true,
            span_events: false,
            file_line_info: false,
            thread_ids: false,
            include_target: true,
            service_name: "tollway".to_string(),
        }
    }

    /// Sets the service name.
    #[must_use]
    pub fn with_service_name(mut self, name: impl Into<String>) -> Self {
        self.service_name = name.into();
        self
    }
}

/// Initializes the global subscriber.
///
/// Does nothing when `config.enabled` is false.
///
/// # Errors
///
/// Returns `TelemetryError::LoggingInit` if the level directive is invalid or
/// a global subscriber is already installed.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;

    tracing_subscriber::registry()
        .with(fmt_layer(config).with_filter(filter))
        .try_init()
        .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;

    tracing::debug!(service.name = %config.service_name, "Logging initialized");

    Ok(())
}

/// Builds the formatting layer: JSON lines or pretty multi-line output.
fn fmt_layer(config: &LogConfig) -> Box<dyn Layer<Registry> + Send + Sync> {
    let span_events = if config.span_events {
        FmtSpan::NEW | FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    let layer = tracing_subscriber::fmt::layer()
        .with_span_events(span_events)
        .with_file(config.file_line_info)
        .with_line_number(config.file_line_info)
        .with_thread_ids(config.thread_ids)
        .with_target(config.include_target);

    if config.json_format {
        layer.json().boxed()
    } else {
        layer.pretty().boxed()
    }
}

/// Parses a filter directive such as `info` or `tollway=debug,warn`.
///
/// # Errors
///
/// Returns `TelemetryError::LoggingInit` if the directive is invalid.
pub fn create_env_filter(filter: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(filter)
        .map_err(|e| TelemetryError::LoggingInit(format!("Invalid log level: {e}")))
}

/// Standard log field names.
pub mod fields {
    /// HTTP method field name.
    pub const HTTP_METHOD: &str = "http.method";

    /// HTTP path field name.
    pub const HTTP_PATH: &str = "http.path";

    /// HTTP status code field name.
    pub const HTTP_STATUS: &str = "http.status_code";

    /// Route name field name.
    pub const ROUTE_NAME: &str = "route.name";

    /// Duration field name (in milliseconds).
    pub const DURATION_MS: &str = "duration_ms";

    /// Error field name.
    pub const ERROR: &str = "error";

    /// Service name field name.
    pub const SERVICE_NAME: &str = "service.name";
}
