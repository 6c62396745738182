//! Configuration management.

use crate::{CoreError, CoreResult, Paths};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Seconds a user waits before requesting another code for the same email.
pub const DEFAULT_OTP_COOLDOWN_SECONDS: u32 = 30;

/// Wait applied to a 429 that carries no usable `Retry-After`.
pub const RATE_LIMIT_FALLBACK_SECS: u32 = 30;

/// Client configuration.
///
/// Blank backend URLs select the demo backends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Log level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Auth backend base URL.
    #[serde(default)]
    pub auth_base_url: String,
    /// Deep link the auth backend redirects to after OAuth.
    #[serde(default)]
    pub oauth_redirect_url: String,
    /// Billing API base URL.
    #[serde(default)]
    pub api_base_url: String,
    #[serde(default)]
    pub billing_sync_enabled: bool,
    /// Static bearer for the billing sync call, when no session token is used.
    #[serde(default)]
    pub billing_bearer_token: Option<String>,
    #[serde(default = "default_otp_cooldown_seconds")]
    pub otp_cooldown_seconds: u32,
    #[serde(default = "default_rate_limit_fallback_seconds")]
    pub rate_limit_fallback_seconds: u32,
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

fn default_otp_cooldown_seconds() -> u32 {
    DEFAULT_OTP_COOLDOWN_SECONDS
}

fn default_rate_limit_fallback_seconds() -> u32 {
    RATE_LIMIT_FALLBACK_SECS
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            auth_base_url: String::new(),
            oauth_redirect_url: String::new(),
            api_base_url: String::new(),
            billing_sync_enabled: false,
            billing_bearer_token: None,
            otp_cooldown_seconds: DEFAULT_OTP_COOLDOWN_SECONDS,
            rate_limit_fallback_seconds: RATE_LIMIT_FALLBACK_SECS,
        }
    }
}

impl Config {
    /// Load configuration from the config file (if present), then apply
    /// environment overrides.
    pub fn load(paths: &Paths) -> CoreResult<Self> {
        let config_path = paths.config_file();

        let mut config = if config_path.exists() {
            Self::load_from_file(&config_path)?
        } else {
            Self::default()
        };

        config.load_from_env();
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: &Path) -> CoreResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    fn load_from_env(&mut self) {
        self.apply_overrides(|name| std::env::var(name).ok());
    }

    /// Apply `TEMPLATE_*` overrides from `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("TEMPLATE_LOG_LEVEL") {
            self.log_level = level;
        }
        if let Some(url) = lookup("TEMPLATE_AUTH_BASE_URL") {
            self.auth_base_url = url;
        }
        if let Some(url) = lookup("TEMPLATE_OAUTH_REDIRECT_URL") {
            self.oauth_redirect_url = url;
        }
        if let Some(url) = lookup("TEMPLATE_API_BASE_URL") {
            self.api_base_url = url;
        }
        if let Some(raw) = lookup("TEMPLATE_BILLING_SYNC_ENABLED") {
            self.billing_sync_enabled = matches!(
                raw.trim().to_ascii_lowercase().as_str(),
                "1" | "true" | "yes" | "on"
            );
        }
        if let Some(token) = lookup("TEMPLATE_BILLING_BEARER_TOKEN") {
            let token = token.trim();
            self.billing_bearer_token = (!token.is_empty()).then(|| token.to_string());
        }
    }

    /// Parsed auth base URL, `None` when unset (demo mode).
    pub fn auth_base_url(&self) -> CoreResult<Option<Url>> {
        parse_optional_url(&self.auth_base_url)
    }

    /// Parsed billing API base URL, `None` when unset.
    pub fn api_base_url(&self) -> CoreResult<Option<Url>> {
        parse_optional_url(&self.api_base_url)
    }

    /// Reject configurations that would fail at request time.
    pub fn validate(&self) -> CoreResult<()> {
        self.auth_base_url()?;
        self.api_base_url()?;
        if !self.auth_base_url.trim().is_empty() && self.oauth_redirect_url.trim().is_empty() {
            return Err(CoreError::Config(
                "oauth_redirect_url is required when auth_base_url is set".to_string(),
            ));
        }
        Ok(())
    }
}

fn parse_optional_url(raw: &str) -> CoreResult<Option<Url>> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    Url::parse(trimmed).map(Some).map_err(CoreError::from)
}
