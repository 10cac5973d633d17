//! Parcel tracker library entry points.
//!
//! This crate maps the public carrier identifiers onto tracker tokens, defines
//! the [`Tracker`] seam that external tracking capabilities implement, and
//! normalizes their results. Higher-level consumers (CLI, HTTP service) should
//! only depend on the functions exported here instead of reimplementing
//! behavior.

#![deny(warnings)]

pub mod carrier;
pub mod error;
pub mod fixture;
pub mod http;
pub mod status;
pub mod tracking;

pub use carrier::{Carrier, CarrierToken};
pub use error::{Error, Result};
pub use fixture::StaticTracker;
pub use http::{HttpTracker, DEFAULT_TIMEOUT};
pub use status::StatusCategory;
pub use tracking::{
    track_parcel, TrackedTime, Tracker, TrackingQuery, TrackingRecord, TrackingResult,
};
