//! Parcel tracker CLI library.
//!
//! This crate provides the output formatting used by the `parcel-tracker`
//! binary, kept separate so it can be unit tested.

pub mod output;
