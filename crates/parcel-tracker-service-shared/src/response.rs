//! Response envelope for successful HTTP responses.

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use parcel_tracker_lib::{Carrier, StatusCategory, TrackingResult};

/// Envelope for successful responses: `{"success": true, "data": ...}`.
///
/// # Example
///
/// ```
/// use parcel_tracker_service_shared::ServiceResponse;
/// use serde::Serialize;
///
/// #[derive(Serialize)]
/// struct Carriers {
///     count: usize,
/// }
///
/// let response = ServiceResponse::new(Carriers { count: 4 });
/// assert!(response.success);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceResponse<T> {
    /// Always `true`; failures are reported as problem documents instead.
    pub success: bool,

    /// The actual response payload.
    pub data: T,
}

impl<T> ServiceResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Implement IntoResponse for axum to return ServiceResponse as HTTP responses.
impl<T: Serialize> IntoResponse for ServiceResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Payload of a successful `/api/track` lookup.
///
/// `time` and `raw_data` are always present in the JSON, as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingData {
    pub order_id: String,
    pub platform: Carrier,
    pub status: String,
    pub time: Option<String>,
    pub is_delivered: bool,
    pub raw_data: Option<Value>,
    pub category: StatusCategory,
}

impl From<TrackingResult> for TrackingData {
    fn from(result: TrackingResult) -> Self {
        Self {
            order_id: result.order_id,
            platform: result.carrier,
            status: result.status,
            time: result.timestamp,
            is_delivered: result.is_delivered,
            raw_data: result.raw_data,
            category: result.category,
        }
    }
}

/// Entry in the `/api/carriers` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarrierInfo {
    pub id: Carrier,
    pub token: String,
    pub name: String,
}

impl From<Carrier> for CarrierInfo {
    fn from(carrier: Carrier) -> Self {
        Self {
            id: carrier,
            token: carrier.token().to_string(),
            name: carrier.display_name().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_result() -> TrackingResult {
        TrackingResult {
            order_id: "TEST123".to_string(),
            carrier: Carrier::SevenEleven,
            status: "Delivered".to_string(),
            timestamp: None,
            is_delivered: true,
            raw_data: None,
            category: StatusCategory::Delivered,
        }
    }

    #[test]
    fn test_envelope_serialization() {
        let response = ServiceResponse::new(TrackingData::from(sample_result()));
        let json: Value = serde_json::to_value(&response).unwrap();

        assert_eq!(json["success"], true);
        assert_eq!(json["data"]["order_id"], "TEST123");
        assert_eq!(json["data"]["platform"], "seven_eleven");
        assert_eq!(json["data"]["category"], "delivered");
    }

    #[test]
    fn test_absent_fields_serialize_as_null() {
        let json: Value = serde_json::to_value(TrackingData::from(sample_result())).unwrap();
        let object = json.as_object().unwrap();

        assert!(object.contains_key("time"));
        assert!(object["time"].is_null());
        assert!(object.contains_key("raw_data"));
        assert!(object["raw_data"].is_null());
    }

    #[test]
    fn test_into_response_is_ok_json() {
        let response = ServiceResponse::new(7u32).into_response();
        assert_eq!(response.status(), axum::http::StatusCode::OK);
        assert_eq!(
            response.headers().get(axum::http::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_carrier_info() {
        let info = CarrierInfo::from(Carrier::OkMart);
        let json = serde_json::to_string(&info).unwrap();
        assert!(json.contains("\"id\":\"okmart\""));
        assert!(json.contains("\"token\":\"OKMart\""));
        assert!(json.contains("\"name\":\"OK Mart\""));
    }
}
