//! Text and JSON rendering for lookup results and the carrier listing.

use serde::Serialize;
use serde_json::Value;

use parcel_tracker_lib::{Carrier, StatusCategory, TrackingResult};

/// JSON shape of a lookup result, matching the HTTP service's `data` object.
#[derive(Debug, Serialize)]
struct TrackingJson<'a> {
    order_id: &'a str,
    platform: Carrier,
    status: &'a str,
    time: Option<&'a str>,
    is_delivered: bool,
    raw_data: Option<&'a Value>,
    category: StatusCategory,
}

impl<'a> From<&'a TrackingResult> for TrackingJson<'a> {
    fn from(result: &'a TrackingResult) -> Self {
        Self {
            order_id: &result.order_id,
            platform: result.carrier,
            status: &result.status,
            time: result.timestamp.as_deref(),
            is_delivered: result.is_delivered,
            raw_data: result.raw_data.as_ref(),
            category: result.category,
        }
    }
}

/// `{"success": true, "data": ...}`, as returned by `GET /api/track`.
#[derive(Debug, Serialize)]
struct Envelope<'a> {
    success: bool,
    data: TrackingJson<'a>,
}

/// Render a lookup result as a pretty-printed JSON envelope.
pub fn render_json(result: &TrackingResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&Envelope {
        success: true,
        data: TrackingJson::from(result),
    })
}

/// Render a lookup result as aligned `label: value` lines.
pub fn render_text(result: &TrackingResult) -> String {
    let mut lines = vec![
        format!("{:<10} {}", "Order:", result.order_id),
        format!(
            "{:<10} {} ({})",
            "Platform:",
            result.carrier.display_name(),
            result.carrier
        ),
        format!("{:<10} {}", "Status:", result.status),
        format!("{:<10} {}", "Category:", result.category),
    ];
    if let Some(time) = &result.timestamp {
        lines.push(format!("{:<10} {}", "Time:", time));
    }
    lines.push(format!(
        "{:<10} {}",
        "Delivered:",
        if result.is_delivered { "yes" } else { "no" }
    ));
    lines.join("\n")
}

/// Render the supported carriers as a table.
pub fn render_carriers() -> String {
    let mut out = format!("{:<14} {:<12} {}", "Platform", "Token", "Name");
    for carrier in Carrier::ALL {
        out.push('\n');
        out.push_str(&format!(
            "{:<14} {:<12} {}",
            carrier.as_str(),
            carrier.token().as_str(),
            carrier.display_name()
        ));
    }
    out
}
