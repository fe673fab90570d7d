//! Request payloads sent to the backend
//!
//! The order-placement wire format mirrors what the kitchen side
//! expects: per-line configuration breakdowns split into `singles`
//! and `multiples`, with price deltas as 2-decimal strings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Body of `POST /order/place`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub table_code: String,
    pub cart: Vec<OrderLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Marks the order as entered by staff rather than a guest device
    pub placed_by_staff: bool,
}

/// One submitted order line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    /// Original menu item uuid
    pub item_id: String,
    pub qty: u32,
    /// Unit price including configuration deltas
    pub price: f64,
    /// Free-text note as a single-element list, empty when absent
    #[serde(default)]
    pub comments: Vec<String>,
    /// Omitted entirely when the line has no configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_configurations: Option<ConfigurationSelections>,
    /// Sum of all selected option deltas
    pub configuration_total: f64,
    /// Item price before configuration
    pub base_price: f64,
}

/// Configuration breakdown bucketed by selection mode
///
/// Also reused as the read-side snapshot attached to order and billing
/// items, which the backend echoes back in the same shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConfigurationSelections {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub singles: Option<BTreeMap<String, SingleSelection>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub multiples: Option<BTreeMap<String, Vec<MultipleSelection>>>,
}

impl ConfigurationSelections {
    pub fn is_empty(&self) -> bool {
        self.singles.is_none() && self.multiples.is_none()
    }
}

/// Chosen option of a single-choice group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SingleSelection {
    pub value: String,
    /// 2-decimal string, e.g. "1.50"
    pub price_change: String,
}

/// Chosen option of a multiple-choice group
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MultipleSelection {
    pub title: String,
    pub price_change: String,
}

/// Body of `POST /table/start-session`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSessionRequest {
    pub table_code: String,
}

/// Body of `POST /items/bulk-pay`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkPayRequest {
    pub item_ids: Vec<String>,
}

/// Body of `POST /orders/{code}/move`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoveOrderRequest {
    /// Target table code
    pub table_code: String,
    /// Restrict the move to specific items; `None` moves everything
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item_ids: Option<Vec<String>>,
}

/// Body of `POST /push-tokens`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterPushTokenRequest {
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
    pub platform: String,
    pub company_id: i64,
}

/// Body of `DELETE /push-tokens`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnregisterPushTokenRequest {
    pub token: String,
}
