//! Table Model

use serde::{Deserialize, Serialize};

use crate::serde_helpers::{bool_true, flex_f64};

/// Occupancy status reported by the backend
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TableStatus {
    Free,
    Occupied,
}

/// Dining table entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub id: i64,
    /// Short code used as the table's API key (sessions, billing, moves)
    pub code: String,
    pub name: String,
    #[serde(default = "crate::serde_helpers::truthy", deserialize_with = "bool_true")]
    pub is_active: bool,
    pub status: TableStatus,
    #[serde(default)]
    pub session_count: u32,
    /// Unpaid revenue currently accumulated at the table
    #[serde(default, with = "flex_f64")]
    pub pending_revenue: f64,
}

impl Table {
    pub fn is_occupied(&self) -> bool {
        self.status == TableStatus::Occupied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_parses_status_and_revenue() {
        let raw = r#"{
            "id": 3,
            "code": "T3",
            "name": "Terrasse 3",
            "is_active": true,
            "status": "occupied",
            "session_count": 2,
            "pending_revenue": "42.80"
        }"#;
        let table: Table = serde_json::from_str(raw).unwrap();
        assert!(table.is_occupied());
        assert_eq!(table.pending_revenue, 42.80);
    }
}
