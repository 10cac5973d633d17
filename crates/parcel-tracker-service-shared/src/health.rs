//! Health and status handlers.
//!
//! - `GET /` and `GET /api/health`: the simple status documents mobile clients poll
//! - `GET /health/live` and `GET /health/ready`: Kubernetes liveness/readiness checks

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;

/// Body of `GET /`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceBanner {
    pub status: String,
    pub message: String,
}

/// Body of `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiHealth {
    pub status: String,
}

/// Health status response for liveness and readiness checks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthStatus {
    /// Status indicator: "ok".
    pub status: String,

    /// Service name for identification.
    pub service: String,

    /// Service version from build-time.
    pub version: String,

    /// Tracker backend in use (for readiness check).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tracker: Option<String>,
}

impl HealthStatus {
    /// Create a healthy liveness status.
    pub fn alive(service: &str, version: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            tracker: None,
        }
    }

    /// Create a ready status naming the tracker backend.
    pub fn ready(service: &str, version: &str, tracker: &str) -> Self {
        Self {
            status: "ok".to_string(),
            service: service.to_string(),
            version: version.to_string(),
            tracker: Some(tracker.to_string()),
        }
    }
}

/// Root handler: `{"status":"ok","message":"<service name>"}`.
pub async fn root(State(state): State<AppState>) -> Json<ServiceBanner> {
    Json(ServiceBanner {
        status: "ok".to_string(),
        message: state.service_name().to_string(),
    })
}

/// `GET /api/health`. Stateless; always `{"status":"healthy"}`.
pub async fn api_health() -> Json<ApiHealth> {
    Json(ApiHealth {
        status: "healthy".to_string(),
    })
}

/// Liveness check handler.
///
/// ```text
/// GET /health/live
/// {"status":"ok","service":"parcel-tracker-service-shared","version":"0.1.0"}
/// ```
pub async fn health_live() -> impl IntoResponse {
    let status = HealthStatus::alive(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    (StatusCode::OK, Json(status))
}

/// Readiness check handler.
///
/// State is only constructed once a tracker exists, so a running service is
/// always ready; the body reports which backend answers lookups.
///
/// ```text
/// GET /health/ready
/// {"status":"ok","service":"parcel-tracker-service-shared","version":"0.1.0","tracker":"http"}
/// ```
pub async fn health_ready(State(state): State<AppState>) -> impl IntoResponse {
    let tracker = state.tracker();
    let status = HealthStatus::ready(
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION"),
        tracker.name(),
    );
    (StatusCode::OK, Json(status))
}
