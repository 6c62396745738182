//! Auth backend contract.

use crate::OAuthProvider;
use api_gateway::AuthResult;
use async_trait::async_trait;

/// Backend operations behind the OAuth and OTP flows.
///
/// OAuth support is optional: the defaults describe a backend without it.
#[async_trait]
pub trait AuthRepository: Send + Sync {
    /// Browser URL that starts an OAuth login, `None` when unconfigured.
    fn build_oauth_authorize_url(&self, _provider: OAuthProvider) -> Option<String> {
        None
    }

    /// Finish a login from the redirect URI the browser handed back.
    async fn complete_oauth_callback(&self, _callback_uri: &str) -> AuthResult {
        AuthResult::failure("OAuth not configured")
    }

    async fn request_otp(&self, email: &str) -> AuthResult;

    /// Verify a code, persisting any access token the backend returns.
    async fn verify_otp(&self, email: &str, code: &str) -> AuthResult;

    /// Revoke the session server-side, then forget it locally.
    async fn logout(&self) -> AuthResult;

    /// Forget the session without telling the backend.
    async fn clear_local_session(&self) -> AuthResult {
        AuthResult::Success
    }
}
