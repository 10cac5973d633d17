//! Deterministic in-memory tracker loaded from a JSON fixture.
//!
//! Fixture files are arrays of entries:
//!
//! ```json
//! [
//!   {"carrier": "SevenEleven", "order_id": "TEST123",
//!    "record": {"order_id": "TEST123", "status": "Delivered", "is_delivered": true}},
//!   {"carrier": "Shopee", "order_id": "TW-TIMEOUT", "error": "connection timeout"}
//! ]
//! ```
//!
//! Entries without a record or an error, and order ids not listed at all, are
//! reported as not found.

use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use serde::Deserialize;
use tracing::info;

use crate::carrier::CarrierToken;
use crate::error::{Error, Result};
use crate::tracking::{Tracker, TrackingRecord};

#[derive(Debug, Clone)]
enum Reply {
    Found(TrackingRecord),
    Missing,
    Fail(String),
}

#[derive(Debug, Deserialize)]
struct FixtureEntry {
    carrier: CarrierToken,
    order_id: String,
    #[serde(default)]
    record: Option<TrackingRecord>,
    #[serde(default)]
    error: Option<String>,
}

/// [`Tracker`] answering from a fixed table. Counts every call it receives.
#[derive(Debug, Default)]
pub struct StaticTracker {
    replies: HashMap<(CarrierToken, String), Reply>,
    calls: AtomicUsize,
}

impl StaticTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a fixture file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let tracker = Self::from_json(&text)?;
        info!(
            path = %path.display(),
            entries = tracker.replies.len(),
            "loaded tracking fixture"
        );
        Ok(tracker)
    }

    /// Parse fixture JSON.
    pub fn from_json(text: &str) -> Result<Self> {
        let entries: Vec<FixtureEntry> = serde_json::from_str(text)?;
        let mut tracker = Self::new();
        for entry in entries {
            let reply = match (entry.record, entry.error) {
                (_, Some(message)) => Reply::Fail(message),
                (Some(record), None) => Reply::Found(record),
                (None, None) => Reply::Missing,
            };
            tracker
                .replies
                .insert((entry.carrier, entry.order_id), reply);
        }
        Ok(tracker)
    }

    /// Answer `order_id` with `record`.
    pub fn with_record(
        mut self,
        token: CarrierToken,
        order_id: impl Into<String>,
        record: TrackingRecord,
    ) -> Self {
        self.replies
            .insert((token, order_id.into()), Reply::Found(record));
        self
    }

    /// Fail lookups of `order_id` with `message`.
    pub fn with_failure(
        mut self,
        token: CarrierToken,
        order_id: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.replies
            .insert((token, order_id.into()), Reply::Fail(message.into()));
        self
    }

    /// Number of `track` calls served so far.
    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Tracker for StaticTracker {
    fn name(&self) -> &str {
        "static"
    }

    fn track(&self, token: CarrierToken, order_id: &str) -> Result<Option<TrackingRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.replies.get(&(token, order_id.to_string())) {
            Some(Reply::Found(record)) => Ok(Some(record.clone())),
            Some(Reply::Fail(message)) => Err(Error::tracker(message.clone())),
            Some(Reply::Missing) | None => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"[
        {"carrier": "SevenEleven", "order_id": "TEST123",
         "record": {"order_id": "TEST123", "status": "Delivered", "is_delivered": true}},
        {"carrier": "Shopee", "order_id": "TW-TIMEOUT", "error": "connection timeout"},
        {"carrier": "OKMart", "order_id": "GONE"}
    ]"#;

    #[test]
    fn answers_from_fixture() {
        let tracker = StaticTracker::from_json(FIXTURE).unwrap();

        let record = tracker
            .track(CarrierToken::SevenEleven, "TEST123")
            .unwrap()
            .expect("record");
        assert_eq!(record.status, "Delivered");
        assert!(record.is_delivered);
    }

    #[test]
    fn token_is_part_of_the_key() {
        let tracker = StaticTracker::from_json(FIXTURE).unwrap();
        assert!(tracker
            .track(CarrierToken::FamilyMart, "TEST123")
            .unwrap()
            .is_none());
    }

    #[test]
    fn failure_entries_surface_message() {
        let tracker = StaticTracker::from_json(FIXTURE).unwrap();
        let err = tracker
            .track(CarrierToken::Shopee, "TW-TIMEOUT")
            .unwrap_err();
        assert_eq!(err.to_string(), "connection timeout");
    }

    #[test]
    fn bare_entries_and_unknown_ids_are_missing() {
        let tracker = StaticTracker::from_json(FIXTURE).unwrap();
        assert!(tracker.track(CarrierToken::OkMart, "GONE").unwrap().is_none());
        assert!(tracker.track(CarrierToken::OkMart, "NEVER").unwrap().is_none());
    }

    #[test]
    fn counts_calls() {
        let tracker = StaticTracker::new().with_failure(CarrierToken::Shopee, "X", "boom");
        assert_eq!(tracker.call_count(), 0);
        let _ = tracker.track(CarrierToken::Shopee, "X");
        let _ = tracker.track(CarrierToken::Shopee, "Y");
        assert_eq!(tracker.call_count(), 2);
    }

    #[test]
    fn malformed_fixture_is_a_json_error() {
        let err = StaticTracker::from_json("{").unwrap_err();
        assert!(matches!(err, Error::Json(_)));
    }
}
