//! Observability for Tollway.
//!
//! - **Logging**: `tracing` events rendered by `tracing-subscriber` as JSON or
//!   pretty text
//! - **Metrics**: Prometheus-format metrics through the `metrics` facade
//!
//! The dispatcher in the `tollway` crate emits events with the field names in
//! [`logging::fields`] and records the metrics listed in [`metrics`].
//!
//! # Example
//!
//! ```rust,no_run
//! use tollway_telemetry::{init_telemetry, LogConfig, MetricsConfig, TelemetryConfig};
//!
//! let config = TelemetryConfig {
//!     logging: LogConfig::development(),
//!     metrics: MetricsConfig::default(),
//! };
//! init_telemetry(&config).unwrap();
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod logging;
pub mod metrics;

pub use error::TelemetryError;
pub use logging::{init_logging, LogConfig};
pub use metrics::{init_metrics, record_binding_failure, record_request, render_metrics, MetricsConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Configuration for all telemetry subsystems.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetryConfig {
    /// Logging configuration.
    pub logging: LogConfig,

    /// Metrics configuration.
    pub metrics: MetricsConfig,
}

/// Initializes logging, then metrics.
///
/// # Errors
///
/// Returns `TelemetryError` if either subsystem fails to initialize.
pub fn init_telemetry(config: &TelemetryConfig) -> TelemetryResult<()> {
    init_logging(&config.logging)?;
    init_metrics(&config.metrics)?;
    Ok(())
}
