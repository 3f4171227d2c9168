//! Per-call expectation: what to send and which status to expect

use serde_json::Value;

use super::method::Method;

/// Status code expected when nothing else is specified
pub const DEFAULT_EXPECTED_STATUS: u16 = 200;

/// A single forum API call and the status code it should produce
#[derive(Debug, Clone)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API root; may carry a query string
    pub endpoint: String,
    pub body: Option<Value>,
    pub expected_status: u16,
    /// Attach the session's bearer token
    pub auth: bool,
}

impl ApiRequest {
    pub fn new(method: Method, endpoint: impl Into<String>) -> Self {
        Self {
            method,
            endpoint: endpoint.into(),
            body: None,
            expected_status: DEFAULT_EXPECTED_STATUS,
            auth: false,
        }
    }

    pub fn get(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Get, endpoint)
    }

    pub fn post(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Post, endpoint)
    }

    pub fn put(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Put, endpoint)
    }

    pub fn delete(endpoint: impl Into<String>) -> Self {
        Self::new(Method::Delete, endpoint)
    }

    pub fn json(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn expect_status(mut self, status: u16) -> Self {
        self.expected_status = status;
        self
    }

    pub fn authorized(mut self) -> Self {
        self.auth = true;
        self
    }
}
