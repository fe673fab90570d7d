//! Billing Model
//!
//! Itemized billing view for one table, grouped by guest session.

use serde::{Deserialize, Serialize};

use crate::request::ConfigurationSelections;
use crate::serde_helpers::{flex_bool, flex_f64};

/// Response of `/table/{code}/billing`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableBilling {
    pub table: TableRef,
    #[serde(default)]
    pub customers: Vec<CustomerBill>,
    pub totals: BillingTotals,
    /// Tables an order can be moved to
    #[serde(default)]
    pub available_tables: Vec<TableRef>,
}

impl TableBilling {
    /// Flat iterator over every item on the bill, across sessions
    pub fn items(&self) -> impl Iterator<Item = &BillingItem> {
        self.customers.iter().flat_map(|c| c.items.iter())
    }
}

/// Minimal table reference used inside billing payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRef {
    pub id: i64,
    pub code: String,
    pub name: String,
}

/// One guest session's share of the bill
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerBill {
    pub session_id: i64,
    pub customer_number: u32,
    #[serde(default)]
    pub items: Vec<BillingItem>,
    #[serde(with = "flex_f64")]
    pub session_revenue: f64,
}

/// One billable line item
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingItem {
    pub uuid: String,
    pub title: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(with = "flex_f64")]
    pub price: f64,
    #[serde(with = "flex_f64")]
    pub quantity: f64,
    #[serde(with = "flex_f64")]
    pub subtotal: f64,
    pub status: String,
    #[serde(with = "flex_bool")]
    pub is_paid: bool,
    #[serde(default, with = "flex_bool")]
    pub is_added_by_staff: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<ConfigurationSelections>,
    pub created_at: String,
}

/// Aggregate amounts for the whole table
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingTotals {
    #[serde(with = "flex_f64")]
    pub total_amount: f64,
    #[serde(with = "flex_f64")]
    pub paid_amount: f64,
    #[serde(with = "flex_f64")]
    pub pending_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn billing_flattens_sessions() {
        let raw = r#"{
            "table": {"id": 2, "code": "T2", "name": "Fenster 2"},
            "customers": [
                {
                    "session_id": 51, "customer_number": 1, "session_revenue": "9.00",
                    "items": [{
                        "uuid": "bi-1", "title": "Cola", "category": "Drinks",
                        "price": "4.50", "quantity": "2.00", "subtotal": "9.00",
                        "status": "served", "is_paid": 0, "is_added_by_staff": 0,
                        "created_at": "2025-11-02 19:01:00"
                    }]
                },
                {"session_id": 52, "customer_number": 2, "session_revenue": 0, "items": []}
            ],
            "totals": {"total_amount": "9.00", "paid_amount": 0, "pending_amount": "9.00"},
            "available_tables": [{"id": 5, "code": "T5", "name": "Bar 5"}]
        }"#;
        let billing: TableBilling = serde_json::from_str(raw).unwrap();
        assert_eq!(billing.items().count(), 1);
        assert_eq!(billing.totals.pending_amount, 9.0);
        assert_eq!(billing.available_tables[0].code, "T5");
    }
}
