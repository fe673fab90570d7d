//! API Response types
//!
//! Every OrderQ endpoint answers with the same envelope:
//!
//! ```json
//! {
//!     "success": true,
//!     "message": "Order placed",
//!     "data": { ... }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Unified API response envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Human-readable message (surfaced verbatim to the user on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Response payload (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            message: None,
            data: Some(data),
        }
    }

    /// Create a successful response with a message
    pub fn ok_with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
            data: None,
        }
    }

    /// Backend message, or a generic fallback
    pub fn message_or_default(&self) -> &str {
        self.message.as_deref().unwrap_or("request failed")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_round_trip() {
        let raw = r#"{"success": true, "data": [1, 2, 3]}"#;
        let resp: ApiResponse<Vec<i64>> = serde_json::from_str(raw).unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap(), vec![1, 2, 3]);
        assert!(resp.message.is_none());
    }

    #[test]
    fn error_envelope_keeps_backend_message() {
        let raw = r#"{"success": false, "message": "table already occupied"}"#;
        let resp: ApiResponse<()> = serde_json::from_str(raw).unwrap();
        assert!(!resp.success);
        assert_eq!(resp.message_or_default(), "table already occupied");
    }
}
