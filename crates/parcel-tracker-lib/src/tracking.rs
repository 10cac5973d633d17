//! Tracking queries, tracker results, and the [`Tracker`] seam.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::carrier::{Carrier, CarrierToken};
use crate::error::{Error, Result};
use crate::status::StatusCategory;

/// Offset applied when rendering unix timestamps (Asia/Taipei, no DST).
const TAIWAN_OFFSET_SECS: i32 = 8 * 3600;

/// Validated lookup request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackingQuery {
    order_id: String,
    carrier: Carrier,
}

impl TrackingQuery {
    /// Create a query, trimming the order id and rejecting empty ones.
    pub fn new(order_id: impl AsRef<str>, carrier: Carrier) -> Result<Self> {
        let order_id = order_id.as_ref().trim();
        if order_id.is_empty() {
            return Err(Error::EmptyOrderId);
        }
        Ok(Self {
            order_id: order_id.to_string(),
            carrier,
        })
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn carrier(&self) -> Carrier {
        self.carrier
    }
}

/// Timestamp as reported by a tracker: free text or unix seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TrackedTime {
    Unix(i64),
    Text(String),
}

impl TrackedTime {
    /// Trackers report an unknown time as `""` or `0`.
    pub fn is_blank(&self) -> bool {
        match self {
            TrackedTime::Text(text) => text.is_empty(),
            TrackedTime::Unix(secs) => *secs == 0,
        }
    }

    /// Render as display text. Unix seconds become `YYYY-MM-DD HH:MM:SS` in
    /// Taiwan time; text passes through unchanged.
    pub fn render(&self) -> String {
        match self {
            TrackedTime::Text(text) => text.clone(),
            TrackedTime::Unix(secs) => FixedOffset::east_opt(TAIWAN_OFFSET_SECS)
                .zip(DateTime::from_timestamp(*secs, 0))
                .map(|(offset, utc)| {
                    utc.with_timezone(&offset)
                        .format("%Y-%m-%d %H:%M:%S")
                        .to_string()
                })
                .unwrap_or_else(|| secs.to_string()),
        }
    }
}

/// Raw result returned by a [`Tracker`] backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingRecord {
    pub order_id: String,
    pub status: String,
    #[serde(default)]
    pub time: Option<TrackedTime>,
    #[serde(default)]
    pub is_delivered: bool,
    #[serde(default)]
    pub raw_data: Option<Value>,
}

/// Normalized lookup result handed to transports.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingResult {
    pub order_id: String,
    pub carrier: Carrier,
    pub status: String,
    pub timestamp: Option<String>,
    pub is_delivered: bool,
    pub raw_data: Option<Value>,
    pub category: StatusCategory,
}

impl TrackingResult {
    /// Normalize a backend record for the given carrier.
    pub fn from_record(record: TrackingRecord, carrier: Carrier) -> Self {
        let category = StatusCategory::classify(&record.status, record.is_delivered);
        Self {
            timestamp: record
                .time
                .as_ref()
                .filter(|time| !time.is_blank())
                .map(TrackedTime::render),
            order_id: record.order_id,
            carrier,
            status: record.status,
            is_delivered: record.is_delivered,
            raw_data: record.raw_data,
            category,
        }
    }
}

/// External tracking capability.
///
/// Implementations may block (network IO, scraping). `Ok(None)` means the
/// backend confirmed there is no parcel with this order id; any `Err` is an
/// upstream failure. Retries, if any, belong to the implementation.
pub trait Tracker: Send + Sync {
    /// Short backend name used in logs and readiness output.
    fn name(&self) -> &str;

    /// Look up `order_id` with the carrier identified by `token`.
    fn track(&self, token: CarrierToken, order_id: &str) -> Result<Option<TrackingRecord>>;
}

/// Resolve the carrier token, call the tracker, and normalize the outcome.
pub fn track_parcel(tracker: &dyn Tracker, query: &TrackingQuery) -> Result<Option<TrackingResult>> {
    let token = query.carrier().token();
    debug!(
        tracker = tracker.name(),
        token = %token,
        order_id = query.order_id(),
        "dispatching tracking lookup"
    );
    let record = tracker.track(token, query.order_id())?;
    Ok(record.map(|r| TrackingResult::from_record(r, query.carrier())))
}
