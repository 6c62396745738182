//! reqwest-backed [`HttpGateway`].

use crate::{GatewayError, GatewayResponse, GatewayResult, HttpGateway};
use async_trait::async_trait;
use reqwest::header::{ACCEPT, AUTHORIZATION, RETRY_AFTER};
use std::time::Duration;
use tracing::debug;
use url::Url;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Gateway that POSTs JSON to `base_url + path`.
#[derive(Clone)]
pub struct ReqwestGateway {
    http_client: reqwest::Client,
    base_url: String,
}

impl ReqwestGateway {
    /// Create a gateway for `base_url`. A blank base URL is a configuration error.
    pub fn new(base_url: impl Into<String>) -> GatewayResult<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Self::with_client(http_client, base_url)
    }

    pub fn with_client(http_client: reqwest::Client, base_url: impl Into<String>) -> GatewayResult<Self> {
        let base_url = base_url.into().trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(GatewayError::Config("base URL is blank".to_string()));
        }
        Url::parse(&base_url)?;
        Ok(Self {
            http_client,
            base_url,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint_url(&self, path: &str) -> GatewayResult<Url> {
        Ok(Url::parse(&format!("{}{}", self.base_url, path))?)
    }
}

fn parse_retry_after(headers: &reqwest::header::HeaderMap) -> Option<u32> {
    headers
        .get(RETRY_AFTER)?
        .to_str()
        .ok()?
        .trim()
        .parse()
        .ok()
}

#[async_trait]
impl HttpGateway for ReqwestGateway {
    async fn post_json(
        &self,
        path: &str,
        bearer_token: Option<&str>,
        body: &serde_json::Value,
    ) -> GatewayResult<GatewayResponse> {
        let url = self.endpoint_url(path)?;
        debug!(%url, authenticated = bearer_token.is_some(), "POST");

        let mut request = self
            .http_client
            .post(url)
            .header(ACCEPT, "application/json")
            .json(body);
        if let Some(token) = bearer_token.filter(|t| !t.trim().is_empty()) {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let response = request.send().await?;
        let status = response.status().as_u16();
        let retry_after_seconds = parse_retry_after(response.headers());
        let text = response.text().await?;

        debug!(path, status, body_len = text.len(), "Response received");

        Ok(GatewayResponse {
            status,
            body: (!text.is_empty()).then_some(text),
            retry_after_seconds,
        })
    }
}
