//! Convenience-store parcel tracking HTTP microservice.
//!
//! This service exposes a small JSON API in front of a [`Tracker`] backend so
//! that mobile clients can look up 7-11, FamilyMart, OK Mart, and Shopee store
//! pickup parcels with a single GET request.
//!
//! # Endpoints
//!
//! - `GET /` - Service banner
//! - `GET /api/health` - Stateless health document
//! - `GET /api/track?order_id=...&platform=...` - Look up a parcel
//! - `GET /api/carriers` - Supported platforms and their tracker tokens
//! - `GET /metrics` - Prometheus metrics endpoint
//! - `GET /health/live` - Kubernetes liveness check
//! - `GET /health/ready` - Kubernetes readiness check
//!
//! [`Tracker`]: parcel_tracker_lib::Tracker

use std::time::Instant;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{error, info, warn};

use parcel_tracker_lib::{track_parcel, Carrier};
use parcel_tracker_service_shared::{
    api_health, from_lib_error, health_live, health_ready, metrics_handler, record_lookup,
    record_lookup_duration, record_validation_failure, root, AppState, CarrierInfo,
    LookupOutcome, ObservabilityLayer, ProblemDetails, RequestId, ServiceResponse, TrackRequest,
    TrackingData, Validate,
};

/// HTTP response - either success or RFC 9457 error.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum Response {
    Success(ServiceResponse<TrackingData>),
    Error(ProblemDetails),
}

impl IntoResponse for Response {
    fn into_response(self) -> axum::response::Response {
        match self {
            Response::Success(data) => (StatusCode::OK, Json(data)).into_response(),
            Response::Error(problem) => problem.into_response(),
        }
    }
}

/// Build the service router around the given state.
///
/// CORS is fully permissive so browser and mobile web clients can call the
/// API from any origin.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/health", get(api_health))
        .route("/api/track", get(track_handler))
        .route("/api/carriers", get(carriers_handler))
        .route("/metrics", get(metrics_handler))
        .route("/health/live", get(health_live))
        .route("/health/ready", get(health_ready))
        .layer(ObservabilityLayer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Handle `GET /api/track` requests.
async fn track_handler(
    State(state): State<AppState>,
    request_id: Option<Extension<RequestId>>,
    query: Result<Query<TrackRequest>, QueryRejection>,
) -> Response {
    let request_id = request_id
        .map(|Extension(id)| id)
        .unwrap_or_else(RequestId::generate);

    let request = match query {
        Ok(Query(request)) => request,
        Err(rejection) => {
            warn!(request_id = %request_id, error = %rejection, "malformed query string");
            record_validation_failure("malformed_query");
            return Response::Error(ProblemDetails::invalid_request(
                rejection.body_text(),
                request_id.as_str(),
            ));
        }
    };

    let query = match request.validate(request_id.as_str()) {
        Ok(query) => query,
        Err(problem) => {
            info!(
                request_id = %request_id,
                detail = problem.detail.as_deref().unwrap_or(""),
                "rejected track request"
            );
            record_validation_failure(rejection_reason(&request));
            return Response::Error(*problem);
        }
    };

    let carrier = query.carrier();
    let order_id = query.order_id().to_string();

    info!(
        request_id = %request_id,
        order_id = %order_id,
        platform = carrier.as_str(),
        "handling track request"
    );

    // Tracker backends block on network I/O.
    let tracker = state.tracker();
    let start = Instant::now();
    let lookup = tokio::task::spawn_blocking(move || track_parcel(tracker.as_ref(), &query)).await;
    record_lookup_duration(carrier.as_str(), start.elapsed().as_secs_f64());

    match lookup {
        Ok(Ok(Some(result))) => {
            record_lookup(carrier.as_str(), LookupOutcome::Found);
            info!(
                request_id = %request_id,
                status = %result.status,
                is_delivered = result.is_delivered,
                category = %result.category,
                "parcel found"
            );
            Response::Success(ServiceResponse::new(TrackingData::from(result)))
        }
        Ok(Ok(None)) => {
            record_lookup(carrier.as_str(), LookupOutcome::NotFound);
            info!(request_id = %request_id, order_id = %order_id, "parcel not found");
            Response::Error(ProblemDetails::parcel_not_found(
                &order_id,
                carrier,
                request_id.as_str(),
            ))
        }
        Ok(Err(e)) => {
            record_lookup(carrier.as_str(), LookupOutcome::Failed);
            error!(request_id = %request_id, error = %e, "tracking lookup failed");
            Response::Error(from_lib_error(&e, request_id.as_str()))
        }
        Err(e) => {
            record_lookup(carrier.as_str(), LookupOutcome::Failed);
            error!(request_id = %request_id, error = %e, "tracking task aborted");
            Response::Error(ProblemDetails::internal_error(
                "tracking task did not complete",
                request_id.as_str(),
            ))
        }
    }
}

/// Handle `GET /api/carriers` requests.
async fn carriers_handler() -> ServiceResponse<Vec<CarrierInfo>> {
    ServiceResponse::new(Carrier::ALL.into_iter().map(CarrierInfo::from).collect())
}

/// Metric label for a request that failed validation.
fn rejection_reason(request: &TrackRequest) -> &'static str {
    let blank = |value: &Option<String>| value.as_deref().is_none_or(|v| v.trim().is_empty());
    if blank(&request.order_id) {
        "missing_order_id"
    } else if blank(&request.platform) {
        "missing_platform"
    } else {
        "unknown_platform"
    }
}
