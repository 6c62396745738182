//! CLI command implementations.

mod auth;
mod paywall;

pub use auth::{logout, oauth_callback, oauth_url, otp_send, otp_verify, status};
pub use paywall::{paywall_products, paywall_purchase, paywall_restore};

use anyhow::Result;
use app_config_and_utils::{Config, Paths};
use app_storage::{FileStorage, SecureSessionStore, SessionStore};
use auth_engine::{build_auth_repository, ConfigurableAuthRepository};
use std::sync::Arc;
use tracing::debug;

/// Everything a command needs: configuration and the on-disk session.
pub struct Context {
    pub config: Config,
    pub session_store: Arc<dyn SessionStore>,
}

impl Context {
    pub fn new(config: Config, paths: &Paths) -> Result<Self> {
        paths.ensure_dirs()?;
        let storage = FileStorage::new(paths.session_file());
        debug!(path = %storage.path().display(), "Using session file");
        Ok(Self {
            config,
            session_store: Arc::new(SecureSessionStore::new(Arc::new(storage))),
        })
    }

    fn auth_repository(&self) -> Result<ConfigurableAuthRepository> {
        Ok(build_auth_repository(&self.config, self.session_store.clone())?)
    }

    /// Bearer for billing sync: the configured token, else the signed-in session.
    fn billing_bearer_token(&self) -> Option<String> {
        self.config.billing_bearer_token.clone().or_else(|| {
            self.session_store
                .read()
                .unwrap_or_else(|err| {
                    debug!(error = %err, "Session unreadable; syncing without bearer");
                    None
                })
        })
    }
}
