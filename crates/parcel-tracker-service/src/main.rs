//! Parcel tracking HTTP microservice.
//!
//! # Configuration
//!
//! - `TRACKER_UPSTREAM_URL` - Base URL of the remote tracking gateway
//! - `TRACKER_FIXTURE_PATH` - JSON fixture for an offline tracker (takes precedence)
//! - `TRACKER_TIMEOUT_SECS` - Gateway request timeout (default: 30)
//! - `SERVICE_NAME` - Name reported by `GET /` (default: "Parcel Tracker API")
//! - `SERVICE_PORT` - HTTP port (default: 8080)
//! - `RUST_LOG` - Log level (default: info)
//! - `LOG_FORMAT` - Log format: json (default) or text

use std::net::SocketAddr;

use tracing::{error, info};

use parcel_tracker_service::app;
use parcel_tracker_service_shared::{
    init_logging, init_metrics, AppState, LoggingConfig, MetricsConfig, ServiceConfig,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging (reads LOG_FORMAT from environment)
    let logging_config = LoggingConfig::from_env().with_service("parcel-tracker");
    init_logging(&logging_config);

    // Initialize metrics
    let metrics_config = MetricsConfig::from_env();
    if let Err(e) = init_metrics(&metrics_config) {
        // Log but don't fail - metrics are optional
        tracing::warn!(error = %e, "failed to initialize metrics, continuing without metrics");
    }

    let config = ServiceConfig::from_env();
    info!(
        port = config.port,
        service_name = %config.service_name,
        tracker = ?config.tracker,
        "starting parcel tracker service"
    );

    let port = config.port;

    // The gateway client is blocking and must be built off the async runtime.
    let state = tokio::task::spawn_blocking(move || AppState::load(&config))
        .await?
        .map_err(|e| {
            error!(error = %e, "failed to load application state");
            e
        })?;

    info!(state = ?state, "application state loaded");

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(addr = %addr, "listening on");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
