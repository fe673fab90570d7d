//! HTTP client for the OrderQ backend API
//!
//! Thin bearer-token-authenticated wrapper over reqwest. Every endpoint
//! answers the `{success, message, data}` envelope; non-2xx statuses are
//! mapped onto [`ClientError`] with the backend message surfaced verbatim.

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use shared::models::{MenuCategory, Order, Table, TableBilling, WaiterCall};
use shared::request::{
    BulkPayRequest, MoveOrderRequest, PlaceOrderRequest, RegisterPushTokenRequest,
    StartSessionRequest, UnregisterPushTokenRequest,
};
use shared::{ApiResponse, LoginData, LoginRequest};

use crate::session::Session;
use crate::{ClientConfig, ClientError, ClientResult};

/// HTTP client for making requests to the OrderQ backend
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpClient {
    /// Create a new HTTP client from configuration
    pub fn new(config: &ClientConfig) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: None,
        }
    }

    /// Create a client pre-authenticated from a restored session
    pub fn from_session(config: &ClientConfig, session: &Session) -> Self {
        Self::new(config).with_token(session.token.clone())
    }

    /// Set the authentication token
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the current token
    pub fn token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Whether a token is installed
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Build authorization header value
    fn auth_header(&self) -> Option<String> {
        self.token.as_ref().map(|t| format!("Bearer {}", t))
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Make a GET request
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.get(self.url(path));
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request with JSON body
    async fn post<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a POST request without body
    async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let mut request = self.client.post(self.url(path));
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Make a DELETE request with JSON body
    async fn delete<T: DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        let mut request = self.client.delete(self.url(path)).json(body);
        if let Some(auth) = self.auth_header() {
            request = request.header(reqwest::header::AUTHORIZATION, auth);
        }
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle the HTTP response
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> ClientResult<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let message = extract_message(&text);
            return match status {
                StatusCode::UNAUTHORIZED => Err(ClientError::Unauthorized),
                StatusCode::FORBIDDEN => Err(ClientError::Forbidden(message)),
                StatusCode::NOT_FOUND => Err(ClientError::NotFound(message)),
                StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                    Err(ClientError::Validation(message))
                }
                _ => Err(ClientError::Internal(message)),
            };
        }

        response.json().await.map_err(Into::into)
    }

    /// Unwrap a successful envelope into its data
    fn take<T>(resp: ApiResponse<T>) -> ClientResult<T> {
        if !resp.success {
            return Err(ClientError::Backend(resp.message_or_default().to_string()));
        }
        resp.data
            .ok_or_else(|| ClientError::InvalidResponse("missing response data".to_string()))
    }

    /// Check a successful envelope, discarding any data
    fn accept<T>(resp: ApiResponse<T>) -> ClientResult<()> {
        if !resp.success {
            return Err(ClientError::Backend(resp.message_or_default().to_string()));
        }
        Ok(())
    }

    // ========== Auth API ==========

    /// Login with email and password; installs the token on success
    pub async fn login(&mut self, email: &str, password: &str) -> ClientResult<LoginData> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(ClientError::Validation(
                "email and password are required".to_string(),
            ));
        }

        let request = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };

        let data = Self::take(self.post::<ApiResponse<LoginData>, _>("/login", &request).await?)?;
        self.token = Some(data.token.clone());
        Ok(data)
    }

    /// Logout: best-effort server-side token revocation, then local teardown.
    ///
    /// A failed revocation never blocks the logout; the token is cleared
    /// regardless.
    pub async fn logout(&mut self) {
        if self.token.is_some() {
            if let Err(e) = self
                .post_empty::<ApiResponse<serde_json::Value>>("/logout")
                .await
            {
                tracing::warn!(error = %e, "Token revocation failed, clearing session anyway");
            }
        }
        self.token = None;
    }

    // ========== Orders API ==========

    /// List active orders
    pub async fn orders(&self) -> ClientResult<Vec<Order>> {
        Self::take(self.get::<ApiResponse<Vec<Order>>>("/orders").await?)
    }

    /// Flip an order item's readiness flag
    pub async fn toggle_item_ready(&self, item_uuid: &str) -> ClientResult<()> {
        Self::accept(
            self.post_empty::<ApiResponse<serde_json::Value>>(&format!(
                "/item/{}/toggle-ready",
                item_uuid
            ))
            .await?,
        )
    }

    /// Cancel a line item from the order board
    pub async fn cancel_order_item(&self, item_id: i64) -> ClientResult<()> {
        Self::accept(
            self.post_empty::<ApiResponse<serde_json::Value>>(&format!(
                "/order-item/{}/cancel",
                item_id
            ))
            .await?,
        )
    }

    /// Close an order
    pub async fn complete_order(&self, order_id: i64) -> ClientResult<()> {
        Self::accept(
            self.post_empty::<ApiResponse<serde_json::Value>>(&format!(
                "/order/{}/complete",
                order_id
            ))
            .await?,
        )
    }

    /// Close every order of a table
    pub async fn complete_all_table_orders(&self, table_code: &str) -> ClientResult<()> {
        Self::accept(
            self.get::<ApiResponse<serde_json::Value>>(&format!(
                "/completeAllOrder/{}",
                table_code
            ))
            .await?,
        )
    }

    /// Submit a cart as a new order
    pub async fn place_order(&self, request: &PlaceOrderRequest) -> ClientResult<()> {
        Self::accept(
            self.post::<ApiResponse<serde_json::Value>, _>("/order/place", request)
                .await?,
        )
    }

    /// Move order items to another table
    pub async fn move_order(
        &self,
        source_table_code: &str,
        request: &MoveOrderRequest,
    ) -> ClientResult<()> {
        Self::accept(
            self.post::<ApiResponse<serde_json::Value>, _>(
                &format!("/orders/{}/move", source_table_code),
                request,
            )
            .await?,
        )
    }

    // ========== Tables API ==========

    /// List tables with status and pending revenue
    pub async fn tables(&self) -> ClientResult<Vec<Table>> {
        Self::take(self.get::<ApiResponse<Vec<Table>>>("/tables").await?)
    }

    /// Detail view of one table
    pub async fn table_details(&self, table_code: &str) -> ClientResult<Table> {
        Self::take(
            self.get::<ApiResponse<Table>>(&format!("/table/{}/details", table_code))
                .await?,
        )
    }

    /// Open a new guest session at a table
    pub async fn start_session(&self, table_code: &str) -> ClientResult<()> {
        let request = StartSessionRequest {
            table_code: table_code.to_string(),
        };
        Self::accept(
            self.post::<ApiResponse<serde_json::Value>, _>("/table/start-session", &request)
                .await?,
        )
    }

    // ========== Menu API ==========

    /// Fetch the category/item/configuration tree
    pub async fn menu(&self) -> ClientResult<Vec<MenuCategory>> {
        Self::take(self.get::<ApiResponse<Vec<MenuCategory>>>("/menu").await?)
    }

    // ========== Billing API ==========

    /// Itemized billing view for a table
    pub async fn table_billing(&self, table_code: &str) -> ClientResult<TableBilling> {
        Self::take(
            self.get::<ApiResponse<TableBilling>>(&format!("/table/{}/billing", table_code))
                .await?,
        )
    }

    /// Flip an item's paid flag
    pub async fn toggle_item_paid(&self, item_uuid: &str) -> ClientResult<()> {
        Self::accept(
            self.post_empty::<ApiResponse<serde_json::Value>>(&format!(
                "/item/{}/toggle-paid",
                item_uuid
            ))
            .await?,
        )
    }

    /// Cancel an item from the billing view
    pub async fn cancel_item(&self, item_uuid: &str) -> ClientResult<()> {
        Self::accept(
            self.post_empty::<ApiResponse<serde_json::Value>>(&format!(
                "/item/{}/cancel",
                item_uuid
            ))
            .await?,
        )
    }

    /// Mark several items paid at once
    pub async fn bulk_pay_items(&self, item_ids: Vec<String>) -> ClientResult<()> {
        let request = BulkPayRequest { item_ids };
        Self::accept(
            self.post::<ApiResponse<serde_json::Value>, _>("/items/bulk-pay", &request)
                .await?,
        )
    }

    /// Settle a whole table session
    pub async fn pay_session(&self, table_code: &str) -> ClientResult<()> {
        Self::accept(
            self.post_empty::<ApiResponse<serde_json::Value>>(&format!(
                "/session/{}/pay",
                table_code
            ))
            .await?,
        )
    }

    /// Close a table session and free the table
    pub async fn end_session(&self, table_code: &str) -> ClientResult<()> {
        Self::accept(
            self.post_empty::<ApiResponse<serde_json::Value>>(&format!(
                "/session/{}/end",
                table_code
            ))
            .await?,
        )
    }

    // ========== Waiter Calls API ==========

    /// Fetch the call-bell queue
    pub async fn waiter_calls(&self) -> ClientResult<Vec<WaiterCall>> {
        Self::take(self.get::<ApiResponse<Vec<WaiterCall>>>("/waiter-calls").await?)
    }

    /// Confirm (resolve) a waiter call
    pub async fn confirm_waiter_call(&self, call_id: i64) -> ClientResult<()> {
        Self::accept(
            self.post_empty::<ApiResponse<serde_json::Value>>(&format!(
                "/waiter-call/{}/confirm",
                call_id
            ))
            .await?,
        )
    }

    // ========== Push Tokens API ==========

    /// Register this device's push token
    pub async fn register_push_token(
        &self,
        request: &RegisterPushTokenRequest,
    ) -> ClientResult<()> {
        if request.token.is_empty() {
            return Err(ClientError::Validation("push token is required".to_string()));
        }
        Self::accept(
            self.post::<ApiResponse<serde_json::Value>, _>("/push-tokens", request)
                .await?,
        )
    }

    /// Unregister a push token (best-effort on logout)
    pub async fn unregister_push_token(&self, token: &str) -> ClientResult<()> {
        if token.is_empty() {
            return Ok(());
        }
        let request = UnregisterPushTokenRequest {
            token: token.to_string(),
        };
        Self::accept(
            self.delete::<ApiResponse<serde_json::Value>, _>("/push-tokens", &request)
                .await?,
        )
    }
}

/// Pull the `message`/`error` field out of an error body, falling back
/// to the raw text
fn extract_message(text: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(text) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(|m| m.as_str()) {
                return msg.to_string();
            }
        }
    }
    text.to_string()
}
