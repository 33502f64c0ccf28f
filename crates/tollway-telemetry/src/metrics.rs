//! Prometheus metrics for Tollway.
//!
//! Metrics are recorded through the `metrics` facade. Until a recorder is
//! installed with [`init_metrics`], recording is a no-op.
//!
//! # Standard Metrics
//!
//! | Metric | Type | Labels | Description |
//! |--------|------|--------|-------------|
//! | `tollway_requests_total` | Counter | `route`, `status` | Dispatched requests |
//! | `tollway_request_duration_seconds` | Histogram | `route` | Dispatch latency |
//! | `tollway_binding_failures_total` | Counter | `location`, `kind` | Rejected parameters |
//!
//! # Example
//!
//! ```rust
//! use std::time::Duration;
//! use tollway_telemetry::metrics::record_request;
//!
//! record_request("read_item", 200, Duration::from_millis(3));
//! ```

use std::sync::OnceLock;
use std::time::Duration;

use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use serde::{Deserialize, Serialize};

use crate::error::TelemetryError;
use crate::TelemetryResult;

/// Request counter name.
pub const REQUESTS_TOTAL: &str = "tollway_requests_total";

/// Request duration histogram name.
pub const REQUEST_DURATION_SECONDS: &str = "tollway_request_duration_seconds";

/// Binding failure counter name.
pub const BINDING_FAILURES_TOTAL: &str = "tollway_binding_failures_total";

static METRICS_HANDLE: OnceLock<PrometheusHandle> = OnceLock::new();

/// Metrics configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Whether metrics are enabled.
    pub enabled: bool,

    /// Histogram buckets for request duration, in seconds.
    pub duration_buckets: Vec<f64>,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            // 100us to 1s; dispatch never touches the network
            duration_buckets: vec![
                0.0001, 0.0005, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0,
            ],
        }
    }
}

/// Installs the Prometheus recorder as the global metrics recorder.
///
/// No HTTP listener is started; scrape output is available through
/// [`render_metrics`]. Does nothing when `config.enabled` is false.
///
/// # Errors
///
/// Returns `TelemetryError::InvalidConfig` for an empty bucket list and
/// `TelemetryError::MetricsInit` if a recorder is already installed.
pub fn init_metrics(config: &MetricsConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION_SECONDS.to_string()),
            &config.duration_buckets,
        )
        .map_err(|e| TelemetryError::InvalidConfig(e.to_string()))?
        .install_recorder()
        .map_err(|e| TelemetryError::MetricsInit(e.to_string()))?;

    let _ = METRICS_HANDLE.set(handle);

    register_metric_descriptions();

    Ok(())
}

/// Renders metrics in Prometheus text format.
///
/// Returns `None` if metrics are not initialized.
#[must_use]
pub fn render_metrics() -> Option<String> {
    METRICS_HANDLE.get().map(PrometheusHandle::render)
}

fn register_metric_descriptions() {
    describe_counter!(REQUESTS_TOTAL, "Total number of dispatched requests");
    describe_histogram!(
        REQUEST_DURATION_SECONDS,
        "Time from route match to built response, in seconds"
    );
    describe_counter!(
        BINDING_FAILURES_TOTAL,
        "Requests rejected while binding parameters"
    );
}

/// Records a dispatched request.
///
/// `route` is the route name, or `"unmatched"` when no route matched.
pub fn record_request(route: &str, status_code: u16, duration: Duration) {
    counter!(
        REQUESTS_TOTAL,
        "route" => route.to_string(),
        "status" => status_code.to_string()
    )
    .increment(1);

    histogram!(REQUEST_DURATION_SECONDS, "route" => route.to_string())
        .record(duration.as_secs_f64());
}

/// Records a binding failure.
///
/// * `location` - Request part the parameter was read from ("path", "query", "body")
/// * `kind` - Failure kind (e.g., "missing", "type_mismatch")
pub fn record_binding_failure(location: &str, kind: &str) {
    counter!(
        BINDING_FAILURES_TOTAL,
        "location" => location.to_string(),
        "kind" => kind.to_string()
    )
    .increment(1);
}
