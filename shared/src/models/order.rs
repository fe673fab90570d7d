//! Order Model
//!
//! Orders are owned by the backend; the client holds periodically
//! refreshed snapshots and mutates them only through explicit endpoints.

use serde::{Deserialize, Serialize};

use crate::request::ConfigurationSelections;
use crate::serde_helpers::{flex_bool, flex_f64};

/// Active order as listed by `/orders`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub uuid: String,
    pub company_id: i64,
    pub status: String,
    #[serde(with = "flex_f64")]
    pub subtotal: f64,
    #[serde(default)]
    pub total_items: u32,
    #[serde(default)]
    pub note: Option<String>,
    pub created_at: String,
    #[serde(default)]
    pub order_items: Vec<OrderItem>,
}

impl Order {
    /// Table the order belongs to, taken from its first item
    pub fn table_id(&self) -> Option<i64> {
        self.order_items.first().map(|item| item.table_id)
    }

    /// Whether every item has been marked ready
    pub fn all_items_ready(&self) -> bool {
        self.order_items.iter().all(|item| item.is_ready)
    }
}

/// One line of an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: i64,
    pub uuid: String,
    pub table_id: i64,
    pub item_id: i64,
    pub status: String,
    #[serde(with = "flex_f64")]
    pub price: f64,
    /// The backend reports quantities as decimal strings ("2.00")
    #[serde(with = "flex_f64")]
    pub quantity: f64,
    #[serde(with = "flex_f64")]
    pub subtotal: f64,
    /// Wire encoding is a 0/1 integer
    #[serde(with = "flex_bool")]
    pub is_ready: bool,
    #[serde(default)]
    pub note: Option<String>,
    /// Snapshot of the configuration chosen at order time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<ConfigurationSelections>,
    #[serde(default, with = "flex_bool")]
    pub is_added_by_staff: bool,
    pub created_at: String,
    /// Embedded summary of the ordered menu item
    pub item: OrderItemSummary,
}

/// Menu-item summary embedded in an order line
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderItemSummary {
    pub id: i64,
    pub uuid: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(with = "flex_f64")]
    pub price: f64,
    #[serde(default)]
    pub status: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_order() -> Order {
        let raw = r#"{
            "id": 11,
            "uuid": "ord-11",
            "company_id": 7,
            "status": "open",
            "subtotal": "17.40",
            "total_items": 3,
            "created_at": "2025-11-02 18:12:09",
            "order_items": [
                {
                    "id": 101, "uuid": "oi-101", "table_id": 4, "item_id": 9,
                    "status": "open", "price": "5.80", "quantity": "3.00",
                    "subtotal": "17.40", "is_ready": 0, "is_added_by_staff": 1,
                    "created_at": "2025-11-02 18:12:09",
                    "item": {"id": 9, "uuid": "itm-9", "title": "Pad Thai", "price": "5.80"}
                }
            ]
        }"#;
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn order_parses_wire_snapshot() {
        let order = sample_order();
        assert_eq!(order.subtotal, 17.40);
        assert_eq!(order.table_id(), Some(4));
        assert!(!order.all_items_ready());

        let item = &order.order_items[0];
        assert_eq!(item.quantity, 3.0);
        assert!(item.is_added_by_staff);
        assert!(!item.is_ready);
    }

    #[test]
    fn empty_order_has_no_table_and_counts_as_ready() {
        let mut order = sample_order();
        order.order_items.clear();
        assert_eq!(order.table_id(), None);
        assert!(order.all_items_ready());
    }
}
