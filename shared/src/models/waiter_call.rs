//! Waiter Call Model

use serde::{Deserialize, Serialize};

use crate::serde_helpers::flex_bool;

/// Guest-initiated request for staff attention
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaiterCall {
    pub id: i64,
    pub table_id: i64,
    #[serde(default)]
    pub table_name: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default, with = "flex_bool")]
    pub is_resolved: bool,
    pub created_at: String,
}
