//! Coarse delivery-stage classification of free-text carrier statuses.

use std::fmt;

use serde::{Deserialize, Serialize};

const RETURNED_KEYWORDS: &[&str] = &[
    "退回", "退貨", "逾期", "到期未取", "未取退", "返回", "return",
];

const ARRIVED_KEYWORDS: &[&str] = &["到店", "待取", "可取貨", "配達", "已到貨"];

const IN_TRANSIT_KEYWORDS: &[&str] = &["配送中", "運送中", "轉運", "理貨", "物流中心", "前往"];

const SHIPPED_KEYWORDS: &[&str] = &["已寄出", "已收件", "寄件", "出貨", "訂單成立", "賣家"];

/// Delivery stage derived from a carrier status string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusCategory {
    Pending,
    Shipped,
    InTransit,
    ArrivedAtStore,
    Delivered,
    Returned,
}

impl StatusCategory {
    /// Classify a status description.
    ///
    /// The delivered flag reported by the tracker always wins. Otherwise the
    /// first matching keyword group decides, checked in the order returned,
    /// arrived at store, in transit, shipped. Unmatched text is `Pending`.
    pub fn classify(status: &str, is_delivered: bool) -> Self {
        if is_delivered {
            return StatusCategory::Delivered;
        }

        let lowered = status.to_lowercase();
        let contains_any = |keywords: &[&str]| keywords.iter().any(|k| lowered.contains(k));

        if contains_any(RETURNED_KEYWORDS) {
            StatusCategory::Returned
        } else if contains_any(ARRIVED_KEYWORDS) {
            StatusCategory::ArrivedAtStore
        } else if contains_any(IN_TRANSIT_KEYWORDS) {
            StatusCategory::InTransit
        } else if contains_any(SHIPPED_KEYWORDS) {
            StatusCategory::Shipped
        } else {
            StatusCategory::Pending
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            StatusCategory::Pending => "pending",
            StatusCategory::Shipped => "shipped",
            StatusCategory::InTransit => "in_transit",
            StatusCategory::ArrivedAtStore => "arrived_at_store",
            StatusCategory::Delivered => "delivered",
            StatusCategory::Returned => "returned",
        }
    }
}

impl fmt::Display for StatusCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
