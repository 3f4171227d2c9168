//! Harness configuration

use anyhow::Result;
use std::time::Duration;

use crate::validation::{validate_base_url, validate_timeout_secs};

/// Deployed preview backend used when no `--base-url` is given
pub const DEFAULT_BASE_URL: &str = "https://oyun-yazarlari.preview.emergentagent.com";

/// Default timeout for a single request (30 seconds)
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Default timeout for establishing a TCP connection
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Path segment under which the backend mounts its API
const API_PREFIX: &str = "api";

/// Configuration for a harness run
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Backend root, without the `/api` suffix
    pub base_url: String,
    /// Maximum time for one request (connection + transfer)
    pub request_timeout: Duration,
    /// Maximum time to establish a connection
    pub connect_timeout: Duration,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }
}

impl HarnessConfig {
    /// Create a configuration pointing at `base_url` with default timeouts
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// API root, `<base>/api`, with any trailing slash on the base removed
    pub fn api_url(&self) -> String {
        format!("{}/{API_PREFIX}", self.base_url.trim().trim_end_matches('/'))
    }

    /// Check the base URL and timeouts before a client is built
    pub fn validate(&self) -> Result<()> {
        validate_base_url(&self.base_url)?;
        validate_timeout_secs(self.request_timeout.as_secs())?;
        Ok(())
    }
}
