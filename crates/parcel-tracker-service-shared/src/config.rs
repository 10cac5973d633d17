//! Service configuration read from the environment.
//!
//! # Environment Variables
//!
//! - `SERVICE_PORT`: HTTP port (default: 8080)
//! - `SERVICE_NAME`: name reported by `GET /` (default: "Parcel Tracker API")
//! - `TRACKER_FIXTURE_PATH`: JSON fixture for an offline static tracker
//! - `TRACKER_UPSTREAM_URL`: base URL of the remote tracking gateway
//! - `TRACKER_TIMEOUT_SECS`: gateway request timeout (default: 30)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use parcel_tracker_lib::DEFAULT_TIMEOUT;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8080;

/// Default service name reported by the root endpoint.
pub const DEFAULT_SERVICE_NAME: &str = "Parcel Tracker API";

/// Where lookups are sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrackerSource {
    /// Answer from a JSON fixture file.
    Fixture { path: PathBuf },
    /// Forward to a remote tracking gateway.
    Upstream { base_url: String, timeout_secs: u64 },
}

/// Configuration for the HTTP service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceConfig {
    pub port: u16,
    pub service_name: String,
    /// `None` when neither a fixture nor an upstream URL is configured.
    pub tracker: Option<TrackerSource>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            service_name: DEFAULT_SERVICE_NAME.to_string(),
            tracker: None,
        }
    }
}

impl ServiceConfig {
    /// Create configuration from environment variables.
    ///
    /// `TRACKER_FIXTURE_PATH` takes precedence over `TRACKER_UPSTREAM_URL`.
    /// Unparseable numbers fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port = non_empty("SERVICE_PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(DEFAULT_PORT);

        let service_name =
            non_empty("SERVICE_NAME").unwrap_or_else(|| DEFAULT_SERVICE_NAME.to_string());

        let timeout_secs = non_empty("TRACKER_TIMEOUT_SECS")
            .and_then(|t| t.trim().parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT.as_secs());

        let tracker = match (non_empty("TRACKER_FIXTURE_PATH"), non_empty("TRACKER_UPSTREAM_URL")) {
            (Some(path), _) => Some(TrackerSource::Fixture {
                path: PathBuf::from(path),
            }),
            (None, Some(base_url)) => Some(TrackerSource::Upstream {
                base_url,
                timeout_secs,
            }),
            (None, None) => None,
        };

        Self {
            port,
            service_name,
            tracker,
        }
    }
}
