//! Auth repository backed by a real auth server.

use crate::callback::{non_blank, parse_callback_parameters};
use crate::{AuthRepository, OAuthProvider};
use api_gateway::{AuthResult, HttpGateway, ResponseClassifier};
use app_config_and_utils::AuthContract;
use app_storage::SessionStore;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, error, info, warn};
use url::form_urlencoded::byte_serialize;

const REQUEST_FAILED: &str = "Request failed";
const LOGOUT_FAILED: &str = "Logout failed";
const STORE_FAILED_MESSAGE: &str = "Failed to store session";

/// Talks to the auth backend through an [`HttpGateway`] and keeps the
/// bearer token in a [`SessionStore`].
pub struct RemoteAuthRepository {
    base_url: String,
    redirect_url: String,
    session_store: Arc<dyn SessionStore>,
    gateway: Arc<dyn HttpGateway>,
    classifier: ResponseClassifier,
}

impl RemoteAuthRepository {
    pub fn new(
        base_url: impl Into<String>,
        redirect_url: impl Into<String>,
        session_store: Arc<dyn SessionStore>,
        gateway: Arc<dyn HttpGateway>,
    ) -> Self {
        Self {
            base_url: base_url.into(),
            redirect_url: redirect_url.into(),
            session_store,
            gateway,
            classifier: ResponseClassifier::default(),
        }
    }

    pub fn with_classifier(mut self, classifier: ResponseClassifier) -> Self {
        self.classifier = classifier;
        self
    }

    fn persist_token(&self, token: &str) -> AuthResult {
        match self.session_store.write(token) {
            Ok(()) => AuthResult::Success,
            Err(err) => {
                error!(error = %err, "Failed to persist access token");
                AuthResult::failure(STORE_FAILED_MESSAGE)
            }
        }
    }

    async fn post(&self, path: &str, bearer: Option<&str>, body: serde_json::Value) -> AuthResult {
        let outcome = self.gateway.post_json(path, bearer, &body).await;
        self.classifier.classify_outcome(outcome, REQUEST_FAILED)
    }
}

#[async_trait]
impl AuthRepository for RemoteAuthRepository {
    fn build_oauth_authorize_url(&self, provider: OAuthProvider) -> Option<String> {
        if self.base_url.trim().is_empty() || self.redirect_url.trim().is_empty() {
            return None;
        }

        let encoded_redirect: String = byte_serialize(self.redirect_url.as_bytes()).collect();
        Some(format!(
            "{}{}?provider={}&redirect_to={}&response_type=token",
            self.base_url.trim_end_matches('/'),
            AuthContract::AUTHORIZE_ENDPOINT,
            provider.provider_key(),
            encoded_redirect
        ))
    }

    async fn complete_oauth_callback(&self, callback_uri: &str) -> AuthResult {
        let params = parse_callback_parameters(callback_uri);

        if let Some(message) =
            non_blank(&params, "error_description").or_else(|| non_blank(&params, "error"))
        {
            warn!(reason = %message, "OAuth callback carried an error");
            return AuthResult::failure(message);
        }

        if let Some(token) = non_blank(&params, "access_token") {
            let result = self.persist_token(token);
            if result.is_success() {
                info!("OAuth login completed with access token");
            }
            return result;
        }

        // Authorization-code flows hand back a code instead of a token.
        if non_blank(&params, "code").is_some() {
            info!("OAuth login completed with authorization code");
            return AuthResult::Success;
        }

        debug!(keys = params.len(), "OAuth callback had no usable parameters");
        AuthResult::failure("Invalid OAuth callback")
    }

    async fn request_otp(&self, email: &str) -> AuthResult {
        let body = serde_json::json!({ "email": email });
        self.post(AuthContract::OTP_ENDPOINT, None, body).await
    }

    async fn verify_otp(&self, email: &str, code: &str) -> AuthResult {
        let body = serde_json::json!({
            "email": email,
            "token": code,
            "type": "email",
        });
        let outcome = self
            .gateway
            .post_json(AuthContract::VERIFY_ENDPOINT, None, &body)
            .await;

        let access_token = outcome
            .as_ref()
            .ok()
            .filter(|response| response.is_success())
            .and_then(|response| response.json_string_field("access_token"))
            .filter(|token| !token.trim().is_empty());

        let result = self.classifier.classify_outcome(outcome, REQUEST_FAILED);
        match (result, access_token) {
            (AuthResult::Success, Some(token)) => self.persist_token(&token),
            (result, _) => result,
        }
    }

    async fn logout(&self) -> AuthResult {
        let token = match self.session_store.read() {
            Ok(token) => token,
            Err(err) => {
                warn!(error = %err, "Could not read session token for logout");
                None
            }
        };

        let outcome = self
            .gateway
            .post_json(
                AuthContract::LOGOUT_ENDPOINT,
                token.as_deref(),
                &serde_json::json!({}),
            )
            .await;

        let result = self.classifier.classify_outcome(outcome, LOGOUT_FAILED);
        if result.is_success() {
            return self.clear_local_session().await;
        }
        result
    }

    async fn clear_local_session(&self) -> AuthResult {
        match self.session_store.clear() {
            Ok(()) => {
                info!("Local session cleared");
                AuthResult::Success
            }
            Err(err) => {
                error!(error = %err, "Failed to clear local session");
                AuthResult::failure("Failed to clear session")
            }
        }
    }
}
