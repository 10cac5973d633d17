//! Prometheus metrics for the parcel tracker service.
//!
//! The recorder is process-global. Until [`init_metrics`] succeeds every
//! `record_*` helper is a no-op and `/metrics` reports that it is disabled.
//!
//! | Metric | Labels |
//! |--------|--------|
//! | `http_requests_total` | `method`, `route`, `status` |
//! | `http_request_duration_seconds` | `method`, `route` |
//! | `parcel_tracker_lookups_total` | `platform`, `outcome` |
//! | `parcel_tracker_lookup_duration_seconds` | `platform` |
//! | `parcel_tracker_validation_failures_total` | `reason` |
//!
//! Every label value comes from a closed set (route templates, carrier ids,
//! status classes), so the number of series stays bounded whatever clients send.

use axum::http::{Method, StatusCode};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use thiserror::Error;

static PROMETHEUS_HANDLE: OnceCell<PrometheusHandle> = OnceCell::new();

/// Whether the Prometheus recorder should be installed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetricsConfig {
    pub enabled: bool,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

impl MetricsConfig {
    /// Read `METRICS_ENABLED` ("false" disables, anything else enables).
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let enabled = lookup("METRICS_ENABLED")
            .map(|v| !v.trim().eq_ignore_ascii_case("false"))
            .unwrap_or(true);
        Self { enabled }
    }
}

/// Errors that can occur during metrics initialization.
#[derive(Debug, Clone, Error)]
pub enum MetricsError {
    #[error("metrics are disabled")]
    Disabled,
    #[error("metrics recorder already initialized")]
    AlreadyInitialized,
    #[error("failed to install metrics recorder: {0}")]
    InstallFailed(String),
}

/// Install the global Prometheus recorder. Call once at startup.
pub fn init_metrics(config: &MetricsConfig) -> Result<(), MetricsError> {
    if !config.enabled {
        return Err(MetricsError::Disabled);
    }
    if PROMETHEUS_HANDLE.get().is_some() {
        return Err(MetricsError::AlreadyInitialized);
    }

    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| MetricsError::InstallFailed(e.to_string()))?;
    PROMETHEUS_HANDLE
        .set(handle)
        .map_err(|_| MetricsError::AlreadyInitialized)
}

/// `GET /metrics`: Prometheus exposition text.
pub async fn metrics_handler() -> String {
    PROMETHEUS_HANDLE
        .get()
        .map(PrometheusHandle::render)
        .unwrap_or_else(|| "# metrics disabled\n".to_string())
}

// =============================================================================
// HTTP metrics
// =============================================================================

/// Status class label: "2xx", "3xx", "4xx", "5xx" or "other".
pub fn status_class(status: StatusCode) -> &'static str {
    if status.is_success() {
        "2xx"
    } else if status.is_redirection() {
        "3xx"
    } else if status.is_client_error() {
        "4xx"
    } else if status.is_server_error() {
        "5xx"
    } else {
        "other"
    }
}

/// Record one served HTTP request.
///
/// `route` must be a route template or another fixed label, never a raw path.
pub fn record_http_request(method: &Method, route: &str, status: StatusCode, seconds: f64) {
    metrics::counter!(
        "http_requests_total",
        "method" => method.as_str().to_string(),
        "route" => route.to_string(),
        "status" => status_class(status)
    )
    .increment(1);
    metrics::histogram!(
        "http_request_duration_seconds",
        "method" => method.as_str().to_string(),
        "route" => route.to_string()
    )
    .record(seconds);
}

// =============================================================================
// Lookup metrics
// =============================================================================

/// Outcome label for a tracking lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupOutcome {
    Found,
    NotFound,
    Failed,
}

impl LookupOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            LookupOutcome::Found => "found",
            LookupOutcome::NotFound => "not_found",
            LookupOutcome::Failed => "failed",
        }
    }
}

/// Count a lookup that reached the tracker. `platform` is a carrier id.
pub fn record_lookup(platform: &str, outcome: LookupOutcome) {
    metrics::counter!(
        "parcel_tracker_lookups_total",
        "platform" => platform.to_string(),
        "outcome" => outcome.as_str()
    )
    .increment(1);
}

/// Time spent waiting on the tracker backend.
pub fn record_lookup_duration(platform: &str, seconds: f64) {
    metrics::histogram!(
        "parcel_tracker_lookup_duration_seconds",
        "platform" => platform.to_string()
    )
    .record(seconds);
}

/// Count a request rejected before reaching the tracker, e.g. "unknown_platform".
pub fn record_validation_failure(reason: &str) {
    metrics::counter!(
        "parcel_tracker_validation_failures_total",
        "reason" => reason.to_string()
    )
    .increment(1);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_reads_enabled_flag() {
        assert!(MetricsConfig::from_lookup(|_| None).enabled);
        assert!(!MetricsConfig::from_lookup(|_| Some("FALSE".to_string())).enabled);
        assert!(MetricsConfig::from_lookup(|_| Some("yes".to_string())).enabled);
    }

    #[test]
    fn test_init_metrics_disabled() {
        let config = MetricsConfig { enabled: false };
        assert!(matches!(init_metrics(&config), Err(MetricsError::Disabled)));
    }

    #[test]
    fn test_status_class() {
        assert_eq!(status_class(StatusCode::OK), "2xx");
        assert_eq!(status_class(StatusCode::MOVED_PERMANENTLY), "3xx");
        assert_eq!(status_class(StatusCode::NOT_FOUND), "4xx");
        assert_eq!(status_class(StatusCode::UNPROCESSABLE_ENTITY), "4xx");
        assert_eq!(status_class(StatusCode::SERVICE_UNAVAILABLE), "5xx");
        assert_eq!(status_class(StatusCode::CONTINUE), "other");
    }

    #[test]
    fn test_lookup_outcome_labels() {
        assert_eq!(LookupOutcome::Found.as_str(), "found");
        assert_eq!(LookupOutcome::NotFound.as_str(), "not_found");
        assert_eq!(LookupOutcome::Failed.as_str(), "failed");
    }

    #[test]
    fn test_helpers_do_not_panic_without_recorder() {
        record_http_request(&Method::GET, "/api/track", StatusCode::OK, 0.01);
        record_lookup("seven_eleven", LookupOutcome::Found);
        record_lookup_duration("okmart", 0.25);
        record_validation_failure("unknown_platform");
    }

    #[test]
    fn test_metrics_error_display() {
        assert_eq!(MetricsError::Disabled.to_string(), "metrics are disabled");
        let failed = MetricsError::InstallFailed("test error".to_string());
        assert!(failed.to_string().contains("test error"));
    }
}
