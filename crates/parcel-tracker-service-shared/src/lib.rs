//! Shared infrastructure for the parcel tracker HTTP service.
//!
//! This crate provides common functionality used by the service binary:
//!
//! - [`AppState`]: The configured tracker, shared across handlers
//! - [`ServiceConfig`]: Environment-driven service configuration
//! - [`health`]: Status handlers and Kubernetes liveness/readiness checks
//! - [`ProblemDetails`]: RFC 9457 Problem Details for consistent error responses
//! - [`ServiceResponse`]: `{"success": true, "data": ...}` envelope
//! - [`metrics`]: Prometheus metrics infrastructure
//! - [`logging`]: Structured JSON logging setup
//! - [`middleware`]: Request tracking and metrics middleware
//! - [`TrackRequest`]: Query validation for `/api/track`
//!
//! # Architecture
//!
//! The service follows a thin-handler pattern where all tracking logic resides
//! in `parcel-tracker-lib`. This crate provides only HTTP glue:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  axum Handler                                               │
//! │  - Parse query string                                       │
//! │  - Validate order id and platform                           │
//! │  - Call parcel-tracker-lib on the blocking pool             │
//! │  - Format response or problem document                      │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Testing Support
//!
//! The [`test_utils`] module provides a fixture-backed state for handler
//! testing. Enable the `test-utils` feature to access it from dependent crates.

#![deny(warnings)]

pub mod config;
pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;
mod problem;
mod request;
mod response;
mod state;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use config::{ServiceConfig, TrackerSource};
pub use health::{api_health, health_live, health_ready, root, ApiHealth, HealthStatus};
pub use logging::{init_logging, LogFormat, LoggingConfig};
pub use metrics::{
    init_metrics, metrics_handler, record_lookup, record_lookup_duration,
    record_validation_failure, LookupOutcome, MetricsConfig, MetricsError,
};
pub use middleware::{
    extract_or_generate_request_id, route_label, ObservabilityLayer, RequestId, REQUEST_ID_HEADER,
    UNMATCHED_ROUTE,
};
pub use problem::{from_lib_error, ProblemDetails, ProblemKind, NOT_FOUND_MESSAGE};
pub use request::{supported_platforms, TrackRequest, Validate};
pub use response::{CarrierInfo, ServiceResponse, TrackingData};
pub use state::{AppState, AppStateError};
