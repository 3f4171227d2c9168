//! Errors raised inside the request executor
//!
//! These never leave the executor: [`super::ApiClient::execute`] folds them
//! into a failed [`super::ApiResponse`] carrying an `error` field.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("Unsupported method: {0}")]
    UnsupportedMethod(String),

    #[error("No authentication token")]
    MissingToken,

    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}
