use std::io::Write;
use std::path::PathBuf;

use parcel_tracker_lib::{
    track_parcel, Carrier, Error, StaticTracker, StatusCategory, TrackingQuery,
};

fn fixture_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures/parcels.json")
}

fn fixture_tracker() -> StaticTracker {
    StaticTracker::from_path(fixture_path()).expect("fixture loads")
}

#[test]
fn seven_eleven_delivered_parcel() {
    let tracker = fixture_tracker();
    let query = TrackingQuery::new("TEST123", Carrier::SevenEleven).unwrap();

    let result = track_parcel(&tracker, &query)
        .expect("lookup succeeds")
        .expect("parcel exists");

    assert_eq!(result.order_id, "TEST123");
    assert_eq!(result.status, "Delivered");
    assert!(result.is_delivered);
    assert_eq!(result.timestamp.as_deref(), Some("2026-01-30 12:06:00"));
    assert_eq!(result.category, StatusCategory::Delivered);
    assert!(result.raw_data.is_some());
}

#[test]
fn unix_timestamps_are_rendered() {
    let tracker = fixture_tracker();
    let query = TrackingQuery::new("FM0001", Carrier::FamilyMart).unwrap();

    let result = track_parcel(&tracker, &query).unwrap().unwrap();

    assert_eq!(result.timestamp.as_deref(), Some("2026-01-30 12:06:00"));
    assert_eq!(result.category, StatusCategory::ArrivedAtStore);
}

#[test]
fn missing_time_stays_absent() {
    let tracker = fixture_tracker();
    let query = TrackingQuery::new("OK0001", Carrier::OkMart).unwrap();

    let result = track_parcel(&tracker, &query).unwrap().unwrap();

    assert!(result.timestamp.is_none());
    assert!(result.raw_data.is_none());
    assert_eq!(result.category, StatusCategory::InTransit);
}

#[test]
fn explicit_and_implicit_misses_are_none() {
    let tracker = fixture_tracker();
    for order_id in ["TW-UNKNOWN", "NEVER-SEEN"] {
        let query = TrackingQuery::new(order_id, Carrier::Shopee).unwrap();
        assert!(track_parcel(&tracker, &query).unwrap().is_none());
    }
}

#[test]
fn failures_keep_their_message() {
    let tracker = fixture_tracker();
    let query = TrackingQuery::new("TW-TIMEOUT", Carrier::Shopee).unwrap();

    let err = track_parcel(&tracker, &query).unwrap_err();

    assert!(matches!(err, Error::Tracker { .. }));
    assert_eq!(err.to_string(), "connection timeout");
}

#[test]
fn repeated_lookups_are_identical() {
    let tracker = fixture_tracker();
    let query = TrackingQuery::new("TEST123", Carrier::SevenEleven).unwrap();

    let first = track_parcel(&tracker, &query).unwrap();
    let second = track_parcel(&tracker, &query).unwrap();

    assert_eq!(first, second);
    assert_eq!(tracker.call_count(), 2);
}

#[test]
fn loads_fixture_from_arbitrary_path() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    write!(
        file,
        r#"[{{"carrier": "Shopee", "order_id": "S1", "record": {{"order_id": "S1", "status": "賣家已出貨"}}}}]"#
    )
    .unwrap();

    let tracker = StaticTracker::from_path(file.path()).expect("fixture loads");
    let query = TrackingQuery::new("S1", Carrier::Shopee).unwrap();
    let result = track_parcel(&tracker, &query).unwrap().unwrap();

    assert_eq!(result.category, StatusCategory::Shipped);
}

#[test]
fn missing_fixture_is_an_io_error() {
    let err = StaticTracker::from_path("/nonexistent/parcels.json").unwrap_err();
    assert!(matches!(err, Error::Io(_)));
}
