//! Test utilities for handler testing.
//!
//! This module provides an [`AppState`] backed by the shared parcel fixture so
//! handler tests never touch the network.

use std::path::PathBuf;
use std::sync::Arc;

use parcel_tracker_lib::StaticTracker;

use crate::state::AppState;

/// Path to the shared tracking fixture.
pub const TEST_FIXTURE_PATH: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../../docs/fixtures/parcels.json"
);

/// Service name used by fixture-backed state.
pub const TEST_SERVICE_NAME: &str = "Parcel Tracker API";

/// Get the absolute path to the tracking fixture.
pub fn fixture_path() -> PathBuf {
    PathBuf::from(TEST_FIXTURE_PATH)
}

/// Load a fresh static tracker from the fixture.
///
/// # Panics
///
/// Panics if the fixture cannot be loaded. This indicates a test
/// configuration issue.
pub fn fixture_tracker() -> Arc<StaticTracker> {
    let path = fixture_path();
    let tracker = StaticTracker::from_path(&path)
        .unwrap_or_else(|e| panic!("failed to load test fixture from {:?}: {}", path, e));
    Arc::new(tracker)
}

/// Build an `AppState` around a fresh fixture tracker.
///
/// Returns the tracker too, so tests can inspect its call counter.
pub fn test_state() -> (AppState, Arc<StaticTracker>) {
    let tracker = fixture_tracker();
    let state = AppState::from_tracker(tracker.clone(), TEST_SERVICE_NAME);
    (state, tracker)
}

/// Order ids present in the fixture.
pub mod fixture_parcels {
    /// 7-11 parcel, delivered, textual timestamp, raw data present.
    pub const DELIVERED_SEVEN_ELEVEN: &str = "TEST123";

    /// FamilyMart parcel waiting at the store, unix timestamp.
    pub const FAMILY_MART_AT_STORE: &str = "FM0001";

    /// OK Mart parcel in transit, no timestamp or raw data.
    pub const OKMART_IN_TRANSIT: &str = "OK0001";

    /// Shopee parcel whose lookup fails with "connection timeout".
    pub const SHOPEE_TIMEOUT: &str = "TW-TIMEOUT";

    /// Shopee parcel the tracker explicitly reports as missing.
    pub const SHOPEE_UNKNOWN: &str = "TW-UNKNOWN";
}
