//! Gateway contract.

use crate::GatewayResult;
use async_trait::async_trait;

/// Raw outcome of one POST.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatewayResponse {
    pub status: u16,
    pub body: Option<String>,
    /// Integer `Retry-After` header, if present and parseable.
    pub retry_after_seconds: Option<u32>,
}

impl GatewayResponse {
    pub fn new(status: u16) -> Self {
        Self {
            status,
            body: None,
            retry_after_seconds: None,
        }
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_retry_after(mut self, seconds: u32) -> Self {
        self.retry_after_seconds = Some(seconds);
        self
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Reads a top-level string field from a JSON body.
    pub fn json_string_field(&self, field: &str) -> Option<String> {
        let body = self.body.as_deref()?;
        let value: serde_json::Value = serde_json::from_str(body).ok()?;
        value
            .get(field)?
            .as_str()
            .map(str::to_string)
    }
}

/// JSON POST against a fixed base URL.
#[async_trait]
pub trait HttpGateway: Send + Sync {
    /// POST `body` to `path`, with `Authorization: Bearer` when a token is given.
    ///
    /// Any HTTP status is a successful call; `Err` means no response arrived.
    async fn post_json(
        &self,
        path: &str,
        bearer_token: Option<&str>,
        body: &serde_json::Value,
    ) -> GatewayResult<GatewayResponse>;
}
