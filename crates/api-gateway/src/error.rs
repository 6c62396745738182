//! Gateway error types.

use thiserror::Error;

/// Transport-level failures. Never surfaced past the gateway edge.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// Network or transport-level HTTP error from reqwest.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Base URL plus path did not form a valid URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Missing base URL or similar setup issue.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl GatewayError {
    /// Returns true if retrying the same request could succeed.
    pub fn is_transient(&self) -> bool {
        match self {
            GatewayError::Http(e) => {
                if e.is_connect() || e.is_timeout() {
                    return true;
                }
                e.status()
                    .map(|status| status.is_server_error())
                    .unwrap_or(false)
            }
            _ => false,
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
