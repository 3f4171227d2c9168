//! Request executor for the forum API.
//!
//! Performs one blocking HTTP call per [`ApiRequest`] and always returns an
//! [`ApiResponse`]. Transport failures, unsupported methods and missing
//! credentials become failed responses with an `error` payload instead of
//! propagating, so a single bad call never aborts a run.

mod error;
mod method;
mod request;
mod response;

pub use error::ExecError;
pub use method::Method;
pub use request::{ApiRequest, DEFAULT_EXPECTED_STATUS};
pub use response::{
    parse_body, with_diagnostics, ApiResponse, BODY_KEY, ERROR_KEY, EXPECTED_STATUS_KEY,
    RAW_RESPONSE_KEY, STATUS_CODE_KEY,
};

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde_json::Value;
use std::error::Error;
use std::time::Instant;
use tracing::debug;

use crate::config::HarnessConfig;

const USER_AGENT: &str = concat!("forum-smoke/", env!("CARGO_PKG_VERSION"));

/// Create an HTTP client with connect and total request timeouts.
/// A request that exceeds either limit fails as a transport error.
pub(crate) fn create_http_client(config: &HarnessConfig) -> Result<Client> {
    Client::builder()
        .connect_timeout(config.connect_timeout)
        .timeout(config.request_timeout)
        .user_agent(USER_AGENT)
        .build()
        .context("Failed to create HTTP client")
}

/// Blocking client bound to one backend's API root
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    api_url: String,
}

impl ApiClient {
    pub fn new(config: &HarnessConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            http: create_http_client(config)?,
            api_url: config.api_url(),
        })
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    /// Full URL for an endpoint relative to the API root
    pub fn url_for(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_url, endpoint.trim_start_matches('/'))
    }

    /// Execute a request, attaching `token` when the request needs auth.
    pub fn execute(&self, request: &ApiRequest, token: Option<&str>) -> ApiResponse {
        match self.try_execute(request, token) {
            Ok(response) => response,
            Err(e) => {
                let message = describe(&e);
                debug!(
                    method = %request.method,
                    endpoint = %request.endpoint,
                    error = %message,
                    "request failed before a response was received"
                );
                ApiResponse::error(message)
            }
        }
    }

    /// Execute a call whose method is given by name.
    ///
    /// Anything other than GET, POST, PUT or DELETE fails without touching
    /// the network, as does `auth_required` with no token.
    pub fn execute_named(
        &self,
        method: &str,
        endpoint: &str,
        body: Option<Value>,
        expected_status: u16,
        auth_required: bool,
        token: Option<&str>,
    ) -> ApiResponse {
        let method: Method = match method.parse() {
            Ok(method) => method,
            Err(e) => return ApiResponse::error(describe(&e)),
        };

        let mut request = ApiRequest::new(method, endpoint).expect_status(expected_status);
        request.body = body;
        request.auth = auth_required;
        self.execute(&request, token)
    }

    fn try_execute(
        &self,
        request: &ApiRequest,
        token: Option<&str>,
    ) -> Result<ApiResponse, ExecError> {
        let url = self.url_for(&request.endpoint);

        let mut builder = self
            .http
            .request(request.method.into(), &url)
            .header(CONTENT_TYPE, "application/json");

        if request.auth {
            let token = token.ok_or(ExecError::MissingToken)?;
            builder = builder.bearer_auth(token);
        }

        if let Some(body) = request.body.as_ref().filter(|_| request.method.carries_body()) {
            builder = builder.json(body);
        }

        let started = Instant::now();
        let response = builder.send()?;
        let status = response.status().as_u16();
        let text = response.text()?;

        debug!(
            method = %request.method,
            url = %url,
            status,
            expected = request.expected_status,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "exchange complete"
        );

        Ok(ApiResponse::from_exchange(
            status,
            request.expected_status,
            &text,
        ))
    }
}

/// Render an error with its source chain so transport failures stay readable
fn describe(err: &ExecError) -> String {
    match err {
        ExecError::Transport(e) => {
            let mut message = if e.is_timeout() {
                format!("Request timed out: {e}")
            } else {
                e.to_string()
            };
            let mut source = e.source();
            while let Some(cause) = source {
                message.push_str(&format!(": {cause}"));
                source = cause.source();
            }
            message
        }
        other => other.to_string(),
    }
}
