//! Blocking HTTP client for a remote tracking gateway.
//!
//! The gateway exposes `GET {base}/track?carrier=<token>&order_id=<id>` and
//! answers with a JSON [`TrackingRecord`], `null`, or a 404 when the parcel is
//! unknown. Any other status is reported as [`Error::UpstreamStatus`].

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use tracing::{debug, warn};

use crate::carrier::CarrierToken;
use crate::error::{Error, Result};
use crate::tracking::{Tracker, TrackingRecord};

/// Default request timeout. Some carriers solve a captcha upstream, so this is generous.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Upstream error bodies are cut to this many characters before being surfaced.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// [`Tracker`] backed by a remote tracking gateway.
#[derive(Debug, Clone)]
pub struct HttpTracker {
    client: Client,
    endpoint: String,
}

impl HttpTracker {
    /// Build a tracker for the gateway rooted at `base_url`.
    ///
    /// Must not be called from inside an async runtime; reqwest's blocking
    /// client drives its own.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent())
            .build()
            .map_err(Error::Http)?;
        Ok(Self {
            client,
            endpoint: track_endpoint(base_url),
        })
    }

    /// Full URL of the gateway's track endpoint (without query string).
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Tracker for HttpTracker {
    fn name(&self) -> &str {
        "http"
    }

    fn track(&self, token: CarrierToken, order_id: &str) -> Result<Option<TrackingRecord>> {
        debug!(endpoint = %self.endpoint, token = %token, order_id, "querying tracking gateway");

        let response = self
            .client
            .get(&self.endpoint)
            .header(ACCEPT, "application/json")
            .query(&[("carrier", token.as_str()), ("order_id", order_id)])
            .send()?;

        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        let body = response.text()?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "tracking gateway returned an error");
            return Err(Error::UpstreamStatus {
                status: status.as_u16(),
                body: truncate(body.trim(), MAX_ERROR_BODY_CHARS),
            });
        }

        parse_record(&body)
    }
}

/// Decode a successful gateway body; `null` and empty bodies mean "not found".
fn parse_record(body: &str) -> Result<Option<TrackingRecord>> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Ok(serde_json::from_str::<Option<TrackingRecord>>(trimmed)?)
}

fn track_endpoint(base_url: &str) -> String {
    format!("{}/track", base_url.trim().trim_end_matches('/'))
}

fn truncate(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

fn user_agent() -> String {
    format!("parcel-tracker-lib/{}", env!("CARGO_PKG_VERSION"))
}
