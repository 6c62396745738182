//! Offline auth repository for demos and local runs.

use crate::{AuthRepository, OAuthProvider};
use api_gateway::AuthResult;
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

const DEMO_LATENCY: Duration = Duration::from_millis(200);

/// Canned backend: every email gets a code except ones containing `rate`,
/// every code verifies except `000000`.
#[derive(Debug, Clone)]
pub struct DemoAuthRepository {
    latency: Duration,
}

impl Default for DemoAuthRepository {
    fn default() -> Self {
        Self {
            latency: DEMO_LATENCY,
        }
    }
}

impl DemoAuthRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_latency(latency: Duration) -> Self {
        Self { latency }
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }
}

#[async_trait]
impl AuthRepository for DemoAuthRepository {
    fn build_oauth_authorize_url(&self, provider: OAuthProvider) -> Option<String> {
        Some(format!(
            "template://auth/callback#access_token=demo-token-{}",
            provider.provider_key()
        ))
    }

    async fn complete_oauth_callback(&self, callback_uri: &str) -> AuthResult {
        if callback_uri.contains("error=") {
            AuthResult::failure("OAuth failed")
        } else {
            AuthResult::Success
        }
    }

    async fn request_otp(&self, email: &str) -> AuthResult {
        self.simulate_latency().await;
        if email.to_lowercase().contains("rate") {
            debug!("Demo backend rate limiting OTP request");
            AuthResult::RateLimited {
                retry_after_seconds: 30,
            }
        } else {
            AuthResult::Success
        }
    }

    async fn verify_otp(&self, _email: &str, code: &str) -> AuthResult {
        self.simulate_latency().await;
        if code == "000000" {
            AuthResult::failure("Invalid verification code")
        } else {
            AuthResult::Success
        }
    }

    async fn logout(&self) -> AuthResult {
        AuthResult::Success
    }
}
