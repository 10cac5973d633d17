//! RFC 9457 problem documents for every non-200 answer.
//!
//! See <https://www.rfc-editor.org/rfc/rfc9457.html>. Clients of this service
//! read `detail`; `instance` carries the request id for log correlation.

use axum::{
    http::{header::CONTENT_TYPE, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use parcel_tracker_lib::{Carrier, Error as LibError};

/// Lead text of every not-found `detail`.
pub const NOT_FOUND_MESSAGE: &str = "No such tracking number";

/// The kinds of problem the service reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProblemKind {
    /// Missing, blank or unsupported query parameters (422).
    InvalidRequest,
    /// The tracker confirmed the parcel does not exist (404).
    ParcelNotFound,
    /// The tracker failed (500).
    UpstreamFailure,
    /// The service itself failed (500).
    Internal,
}

impl ProblemKind {
    pub fn type_uri(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => "/problems/invalid-request",
            ProblemKind::ParcelNotFound => "/problems/parcel-not-found",
            ProblemKind::UpstreamFailure => "/problems/upstream-failure",
            ProblemKind::Internal => "/problems/internal-error",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ProblemKind::InvalidRequest => "Invalid Request",
            ProblemKind::ParcelNotFound => "Parcel Not Found",
            ProblemKind::UpstreamFailure => "Tracking Failed",
            ProblemKind::Internal => "Internal Error",
        }
    }

    pub fn status(self) -> StatusCode {
        match self {
            ProblemKind::InvalidRequest => StatusCode::UNPROCESSABLE_ENTITY,
            ProblemKind::ParcelNotFound => StatusCode::NOT_FOUND,
            ProblemKind::UpstreamFailure | ProblemKind::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// RFC 9457 problem document.
///
/// ```
/// use parcel_tracker_lib::Carrier;
/// use parcel_tracker_service_shared::ProblemDetails;
///
/// let problem = ProblemDetails::parcel_not_found("TEST123", Carrier::SevenEleven, "req-1");
/// assert_eq!(problem.status, 404);
/// assert_eq!(
///     problem.detail.as_deref(),
///     Some("No such tracking number: TEST123 (seven_eleven)")
/// );
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProblemDetails {
    #[serde(rename = "type")]
    pub type_uri: String,
    pub title: String,
    pub status: u16,
    /// Always set by the constructors below.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    /// Request id of the failed request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance: Option<String>,
}

impl ProblemDetails {
    pub fn new(kind: ProblemKind, detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self {
            type_uri: kind.type_uri().to_string(),
            title: kind.title().to_string(),
            status: kind.status().as_u16(),
            detail: Some(detail.into()),
            instance: Some(request_id.into()),
        }
    }

    pub fn invalid_request(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(ProblemKind::InvalidRequest, detail, request_id)
    }

    /// `detail` reads "No such tracking number: <order_id> (<platform>)".
    pub fn parcel_not_found(order_id: &str, carrier: Carrier, request_id: impl Into<String>) -> Self {
        Self::new(
            ProblemKind::ParcelNotFound,
            format!("{}: {} ({})", NOT_FOUND_MESSAGE, order_id, carrier),
            request_id,
        )
    }

    /// `detail` is the tracker's error text, unchanged.
    pub fn upstream_failure(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(ProblemKind::UpstreamFailure, detail, request_id)
    }

    pub fn internal_error(detail: impl Into<String>, request_id: impl Into<String>) -> Self {
        Self::new(ProblemKind::Internal, detail, request_id)
    }
}

impl std::fmt::Display for ProblemDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.detail {
            Some(detail) => write!(f, "{}: {}", self.title, detail),
            None => f.write_str(&self.title),
        }
    }
}

impl std::error::Error for ProblemDetails {}

impl IntoResponse for ProblemDetails {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let mut response = (status, Json(self)).into_response();
        response.headers_mut().insert(
            CONTENT_TYPE,
            HeaderValue::from_static("application/problem+json"),
        );
        response
    }
}

/// Map a library error raised while validating or tracking.
///
/// Input errors are the client's fault (422); anything else came from the
/// tracker backend (500) and keeps its own description as `detail`.
pub fn from_lib_error(error: &LibError, request_id: &str) -> ProblemDetails {
    match error {
        LibError::UnknownCarrier { .. } | LibError::EmptyOrderId => {
            ProblemDetails::invalid_request(error.to_string(), request_id)
        }
        _ => ProblemDetails::upstream_failure(error.to_string(), request_id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_statuses() {
        assert_eq!(ProblemKind::InvalidRequest.status(), StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(ProblemKind::ParcelNotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ProblemKind::UpstreamFailure.status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_invalid_request_is_422() {
        let problem = ProblemDetails::invalid_request("missing 'platform'", "req-123");
        assert_eq!(problem.status, 422);
        assert_eq!(problem.instance.as_deref(), Some("req-123"));
    }

    #[test]
    fn test_serialization_uses_rfc_field_names() {
        let problem = ProblemDetails::invalid_request("Test error", "req-test");
        let json: serde_json::Value = serde_json::to_value(&problem).unwrap();

        assert_eq!(json["type"], "/problems/invalid-request");
        assert_eq!(json["title"], "Invalid Request");
        assert_eq!(json["status"], 422);
        assert_eq!(json["detail"], "Test error");
        assert_eq!(json["instance"], "req-test");
    }

    #[test]
    fn test_from_lib_error_keeps_tracker_message() {
        let problem = from_lib_error(&LibError::tracker("connection timeout"), "req-lib");
        assert_eq!(problem.type_uri, ProblemKind::UpstreamFailure.type_uri());
        assert_eq!(problem.status, 500);
        assert_eq!(problem.detail.as_deref(), Some("connection timeout"));
    }

    #[test]
    fn test_from_lib_error_input_errors() {
        let unknown = LibError::UnknownCarrier {
            name: "dhl".to_string(),
            suggestions: vec![],
        };
        assert_eq!(from_lib_error(&unknown, "r").status, 422);
        assert_eq!(from_lib_error(&LibError::EmptyOrderId, "r").status, 422);
    }

    #[test]
    fn test_into_response_sets_status_and_content_type() {
        let response = ProblemDetails::upstream_failure("boom", "req-x").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            response.headers().get(CONTENT_TYPE).unwrap(),
            "application/problem+json"
        );
    }
}
