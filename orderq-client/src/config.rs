//! Client configuration

use std::time::Duration;

/// Client configuration for connecting to the OrderQ backend
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// API base URL (e.g. "https://staging.orderq.example/api")
    pub base_url: String,

    /// Request timeout in seconds
    pub timeout: u64,

    /// Interval between order-list refresh ticks
    pub order_poll_interval: Duration,

    /// Interval between waiter-call refresh ticks
    pub call_poll_interval: Duration,
}

impl ClientConfig {
    /// Create a new client configuration
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: 30,
            order_poll_interval: Duration::from_secs(2),
            call_poll_interval: Duration::from_secs(5),
        }
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, seconds: u64) -> Self {
        self.timeout = seconds;
        self
    }

    /// Set the order-list poll interval
    pub fn with_order_poll_interval(mut self, interval: Duration) -> Self {
        self.order_poll_interval = interval;
        self
    }

    /// Set the waiter-call poll interval
    pub fn with_call_poll_interval(mut self, interval: Duration) -> Self {
        self.call_poll_interval = interval;
        self
    }

    /// Create an HTTP client from this configuration
    pub fn build_http_client(&self) -> super::HttpClient {
        super::HttpClient::new(self)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new("http://localhost:8000/api")
    }
}
