//! Backend selection between the remote and demo repositories.

use crate::{AuthEngineResult, AuthRepository, DemoAuthRepository, OAuthProvider, RemoteAuthRepository};
use api_gateway::{AuthResult, ReqwestGateway, ResponseClassifier};
use app_config_and_utils::Config;
use app_storage::SessionStore;
use async_trait::async_trait;
use std::sync::Arc;
use tracing::info;

/// Delegates every call to either the fallback or the remote repository,
/// decided once at construction.
pub struct ConfigurableAuthRepository {
    delegate: Arc<dyn AuthRepository>,
    remote: bool,
}

impl ConfigurableAuthRepository {
    /// A blank `auth_base_url` selects `fallback`; otherwise
    /// `remote_factory` is invoked exactly once.
    pub fn new<F>(auth_base_url: &str, fallback: Arc<dyn AuthRepository>, remote_factory: F) -> Self
    where
        F: FnOnce() -> Arc<dyn AuthRepository>,
    {
        if auth_base_url.trim().is_empty() {
            Self::fallback_only(fallback)
        } else {
            Self {
                delegate: remote_factory(),
                remote: true,
            }
        }
    }

    fn fallback_only(fallback: Arc<dyn AuthRepository>) -> Self {
        info!("No auth base URL configured; using demo auth backend");
        Self {
            delegate: fallback,
            remote: false,
        }
    }

    pub fn is_remote(&self) -> bool {
        self.remote
    }
}

#[async_trait]
impl AuthRepository for ConfigurableAuthRepository {
    fn build_oauth_authorize_url(&self, provider: OAuthProvider) -> Option<String> {
        self.delegate.build_oauth_authorize_url(provider)
    }

    async fn complete_oauth_callback(&self, callback_uri: &str) -> AuthResult {
        self.delegate.complete_oauth_callback(callback_uri).await
    }

    async fn request_otp(&self, email: &str) -> AuthResult {
        self.delegate.request_otp(email).await
    }

    async fn verify_otp(&self, email: &str, code: &str) -> AuthResult {
        self.delegate.verify_otp(email, code).await
    }

    async fn logout(&self) -> AuthResult {
        self.delegate.logout().await
    }

    async fn clear_local_session(&self) -> AuthResult {
        self.delegate.clear_local_session().await
    }
}

/// Repository for `config`: demo when no auth base URL is set, remote otherwise.
pub fn build_auth_repository(
    config: &Config,
    session_store: Arc<dyn SessionStore>,
) -> AuthEngineResult<ConfigurableAuthRepository> {
    let fallback: Arc<dyn AuthRepository> = Arc::new(DemoAuthRepository::new());
    if config.auth_base_url.trim().is_empty() {
        return Ok(ConfigurableAuthRepository::fallback_only(fallback));
    }

    let gateway = ReqwestGateway::new(config.auth_base_url.clone())?;
    let remote: Arc<dyn AuthRepository> = Arc::new(
        RemoteAuthRepository::new(
            config.auth_base_url.clone(),
            config.oauth_redirect_url.clone(),
            session_store,
            Arc::new(gateway),
        )
        .with_classifier(ResponseClassifier::new(config.rate_limit_fallback_seconds)),
    );
    Ok(ConfigurableAuthRepository::new(&config.auth_base_url, fallback, move || remote))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{FakeAuthRepository, FakeSessionStore};
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[tokio::test]
    async fn test_blank_url_uses_fallback_and_skips_factory() {
        let calls = AtomicUsize::new(0);
        let fallback = Arc::new(FakeAuthRepository::default());

        let repo = ConfigurableAuthRepository::new("  ", fallback.clone(), || -> Arc<dyn AuthRepository> {
            calls.fetch_add(1, Ordering::SeqCst);
            Arc::new(FakeAuthRepository::default())
        });

        assert!(!repo.is_remote());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        repo.request_otp("user@example.com").await;
        assert_eq!(fallback.request_calls.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_configured_url_uses_remote_once() {
        let calls = AtomicUsize::new(0);
        let fallback = Arc::new(FakeAuthRepository::default());
        let remote = Arc::new(FakeAuthRepository {
            authorize_url: Some("https://auth.example.com/authorize".to_string()),
            ..FakeAuthRepository::default()
        });
        let remote_clone = remote.clone();

        let repo = ConfigurableAuthRepository::new("https://auth.example.com", fallback.clone(), || -> Arc<dyn AuthRepository> {
            calls.fetch_add(1, Ordering::SeqCst);
            remote_clone
        });

        assert!(repo.is_remote());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(
            repo.build_oauth_authorize_url(OAuthProvider::Apple).as_deref(),
            Some("https://auth.example.com/authorize")
        );
        repo.verify_otp("user@example.com", "123456").await;
        repo.complete_oauth_callback("template://cb?code=1").await;
        assert_eq!(remote.verify_calls.lock().unwrap().len(), 1);
        assert_eq!(remote.callback_uris.lock().unwrap().len(), 1);
        assert_eq!(fallback.network_calls(), 0);
    }

    #[test]
    fn test_build_from_default_config_is_demo() {
        let repo = build_auth_repository(&Config::default(), Arc::new(FakeSessionStore::default()))
            .unwrap();
        assert!(!repo.is_remote());
        assert_eq!(
            repo.build_oauth_authorize_url(OAuthProvider::Google).as_deref(),
            Some("template://auth/callback#access_token=demo-token-google")
        );
    }

    #[test]
    fn test_build_from_whitespace_url_is_demo() {
        let config = Config {
            auth_base_url: "   ".to_string(),
            ..Config::default()
        };
        let repo = build_auth_repository(&config, Arc::new(FakeSessionStore::default())).unwrap();
        assert!(!repo.is_remote());
    }

    #[test]
    fn test_build_from_remote_config() {
        let config = Config {
            auth_base_url: "https://auth.example.com".to_string(),
            oauth_redirect_url: "template://auth/callback".to_string(),
            ..Config::default()
        };
        let repo = build_auth_repository(&config, Arc::new(FakeSessionStore::default())).unwrap();
        assert!(repo.is_remote());
        assert!(repo
            .build_oauth_authorize_url(OAuthProvider::Google)
            .unwrap()
            .starts_with("https://auth.example.com/auth/v1/authorize?provider=google"));
    }
}
