//! Request types and validation for HTTP endpoints.

use serde::{Deserialize, Serialize};

use parcel_tracker_lib::{Carrier, TrackingQuery};

use crate::{from_lib_error, ProblemDetails};

/// Validation trait for request types.
///
/// Implementations check every field and produce the validated domain value,
/// or a `ProblemDetails` describing the first invalid field.
pub trait Validate {
    /// Validated form of the request.
    type Output;

    /// Validate the request.
    ///
    /// The `request_id` is used to populate the `instance` field of any
    /// returned `ProblemDetails`. The error is boxed to avoid large
    /// `Result::Err` variants.
    fn validate(&self, request_id: &str) -> Result<Self::Output, Box<ProblemDetails>>;
}

/// Query string of `GET /api/track`.
///
/// Both fields are optional at the serde level so that missing parameters
/// produce a descriptive problem instead of a bare extractor rejection.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrackRequest {
    /// Carrier-issued tracking number.
    #[serde(default)]
    pub order_id: Option<String>,

    /// Carrier identifier, e.g. `seven_eleven`.
    #[serde(default)]
    pub platform: Option<String>,
}

impl Validate for TrackRequest {
    type Output = TrackingQuery;

    fn validate(&self, request_id: &str) -> Result<TrackingQuery, Box<ProblemDetails>> {
        let order_id = match self.order_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id,
            _ => {
                return Err(Box::new(ProblemDetails::invalid_request(
                    "The 'order_id' query parameter is required and cannot be empty",
                    request_id,
                )))
            }
        };

        let platform = match self.platform.as_deref() {
            Some(p) if !p.trim().is_empty() => p,
            _ => {
                return Err(Box::new(ProblemDetails::invalid_request(
                    format!(
                        "The 'platform' query parameter is required; expected one of: {}",
                        supported_platforms()
                    ),
                    request_id,
                )))
            }
        };

        let carrier: Carrier = platform
            .parse()
            .map_err(|e| Box::new(from_lib_error(&e, request_id)))?;

        TrackingQuery::new(order_id, carrier).map_err(|e| Box::new(from_lib_error(&e, request_id)))
    }
}

/// Comma-separated list of accepted `platform` values.
pub fn supported_platforms() -> String {
    Carrier::ALL
        .iter()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}
