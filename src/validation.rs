//! Input validation for forum-smoke CLI arguments.
//!
//! The base URL and timeout are checked before any HTTP client is built so
//! that a typo fails fast instead of producing eighteen transport errors.

use anyhow::{bail, Context, Result};
use reqwest::Url;

/// Maximum accepted request timeout in seconds.
pub const MAX_TIMEOUT_SECS: u64 = 600;

/// Validates that a base URL is an absolute http(s) URL without a query or fragment.
///
/// # Examples
///
/// ```
/// use forum_smoke::validation::validate_base_url;
///
/// assert!(validate_base_url("https://forum.example.com").is_ok());
/// assert!(validate_base_url("http://127.0.0.1:8001/").is_ok());
/// assert!(validate_base_url("ftp://forum.example.com").is_err());
/// assert!(validate_base_url("forum.example.com").is_err());
/// ```
pub fn validate_base_url(raw: &str) -> Result<Url> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        bail!("Base URL cannot be empty");
    }

    let url = Url::parse(trimmed).with_context(|| format!("Invalid base URL '{trimmed}'"))?;

    match url.scheme() {
        "http" | "https" => {}
        other => bail!("Unsupported URL scheme '{other}'. Use http or https"),
    }

    if url.host_str().is_none() {
        bail!("Base URL '{trimmed}' has no host");
    }

    if url.query().is_some() || url.fragment().is_some() {
        bail!("Base URL '{trimmed}' must not contain a query string or fragment");
    }

    Ok(url)
}

/// Validates a request timeout given in whole seconds.
pub fn validate_timeout_secs(secs: u64) -> Result<()> {
    if secs == 0 {
        bail!("Timeout must be at least 1 second");
    }

    if secs > MAX_TIMEOUT_SECS {
        bail!("Timeout too long: {secs}s (max {MAX_TIMEOUT_SECS}s)");
    }

    Ok(())
}

/// Clap value parser for the `--base-url` argument.
pub fn clap_base_url_validator(s: &str) -> Result<String, String> {
    validate_base_url(s).map_err(|e| e.to_string())?;
    Ok(s.trim().to_string())
}

/// Clap value parser for the `--timeout` argument.
pub fn clap_timeout_validator(s: &str) -> Result<u64, String> {
    let secs: u64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a whole number of seconds"))?;
    validate_timeout_secs(secs).map_err(|e| e.to_string())?;
    Ok(secs)
}
