//! Application state for the HTTP service.
//!
//! This module provides the shared state structure that axum handlers use to
//! reach the configured tracker.

use std::sync::Arc;
use std::time::Duration;

use parcel_tracker_lib::{Error as LibError, HttpTracker, StaticTracker, Tracker};
use thiserror::Error;

use crate::config::{ServiceConfig, TrackerSource};

/// Error during application state initialization.
#[derive(Debug, Error)]
pub enum AppStateError {
    #[error("no tracker configured: set TRACKER_UPSTREAM_URL or TRACKER_FIXTURE_PATH")]
    TrackerNotConfigured,

    #[error("failed to load tracker fixture: {0}")]
    FixtureLoad(#[source] LibError),

    #[error("failed to build tracking gateway client: {0}")]
    ClientBuild(#[source] LibError),
}

/// Shared application state for all axum handlers.
///
/// This struct is cheaply cloneable (using `Arc` internally) and should be
/// shared via axum's `State` extractor. It holds no mutable data, so requests
/// cannot observe each other through it.
///
/// # Example
///
/// ```ignore
/// use axum::{Router, routing::get, extract::State};
/// use parcel_tracker_service_shared::{AppState, ServiceConfig};
///
/// async fn handler(State(state): State<AppState>) {
///     let tracker = state.tracker();
///     // ... use tracker
/// }
///
/// let state = AppState::load(&ServiceConfig::from_env()).unwrap();
/// let app = Router::new()
///     .route("/api/track", get(handler))
///     .with_state(state);
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    tracker: Arc<dyn Tracker>,
    service_name: String,
}

impl AppState {
    /// Build application state from configuration.
    ///
    /// Builds a blocking HTTP client for upstream sources, so call this outside
    /// the async runtime (e.g. inside `spawn_blocking`).
    pub fn load(config: &ServiceConfig) -> Result<Self, AppStateError> {
        let tracker: Arc<dyn Tracker> = match &config.tracker {
            None => return Err(AppStateError::TrackerNotConfigured),
            Some(TrackerSource::Fixture { path }) => {
                tracing::info!(path = %path.display(), "loading static tracker fixture");
                Arc::new(StaticTracker::from_path(path).map_err(AppStateError::FixtureLoad)?)
            }
            Some(TrackerSource::Upstream {
                base_url,
                timeout_secs,
            }) => {
                let timeout = Duration::from_secs(*timeout_secs);
                let tracker =
                    HttpTracker::new(base_url, timeout).map_err(AppStateError::ClientBuild)?;
                tracing::info!(
                    endpoint = tracker.endpoint(),
                    timeout_secs = timeout.as_secs(),
                    "using remote tracking gateway"
                );
                Arc::new(tracker)
            }
        };

        Ok(Self::from_tracker(tracker, config.service_name.clone()))
    }

    /// Create application state around an existing tracker.
    ///
    /// This is useful for testing or when embedding a custom backend.
    pub fn from_tracker(tracker: Arc<dyn Tracker>, service_name: impl Into<String>) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                tracker,
                service_name: service_name.into(),
            }),
        }
    }

    /// Shared handle to the tracker, suitable for moving into blocking tasks.
    pub fn tracker(&self) -> Arc<dyn Tracker> {
        Arc::clone(&self.inner.tracker)
    }

    /// Name reported by the root endpoint.
    pub fn service_name(&self) -> &str {
        &self.inner.service_name
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("tracker", &self.inner.tracker.name())
            .field("service_name", &self.inner.service_name)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn fixture_config() -> ServiceConfig {
        ServiceConfig {
            tracker: Some(TrackerSource::Fixture {
                path: PathBuf::from(concat!(
                    env!("CARGO_MANIFEST_DIR"),
                    "/../../docs/fixtures/parcels.json"
                )),
            }),
            ..ServiceConfig::default()
        }
    }

    #[test]
    fn test_app_state_from_tracker() {
        let state = AppState::from_tracker(Arc::new(StaticTracker::new()), "test");
        assert_eq!(state.service_name(), "test");
        assert_eq!(state.tracker().name(), "static");
    }

    #[test]
    fn test_app_state_clone_shares_tracker() {
        let state1 = AppState::from_tracker(Arc::new(StaticTracker::new()), "test");
        let state2 = state1.clone();
        assert!(Arc::ptr_eq(&state1.tracker(), &state2.tracker()));
    }

    #[test]
    fn test_app_state_debug() {
        let state = AppState::from_tracker(Arc::new(StaticTracker::new()), "test");
        let debug = format!("{:?}", state);
        assert!(debug.contains("AppState"));
        assert!(debug.contains("static"));
    }

    #[test]
    fn test_app_state_load_fixture() {
        let state = AppState::load(&fixture_config()).expect("fixture loads");
        assert_eq!(state.tracker().name(), "static");
        assert_eq!(state.service_name(), "Parcel Tracker API");
    }

    #[test]
    fn test_app_state_load_unconfigured() {
        let err = AppState::load(&ServiceConfig::default()).unwrap_err();
        assert!(matches!(err, AppStateError::TrackerNotConfigured));
        assert!(err.to_string().contains("TRACKER_UPSTREAM_URL"));
    }

    #[test]
    fn test_app_state_load_missing_fixture() {
        let config = ServiceConfig {
            tracker: Some(TrackerSource::Fixture {
                path: PathBuf::from("/nonexistent/parcels.json"),
            }),
            ..ServiceConfig::default()
        };
        match AppState::load(&config).unwrap_err() {
            AppStateError::FixtureLoad(_) => {}
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
