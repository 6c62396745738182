//! Shared result vocabulary for remote auth and billing calls.

use crate::{GatewayError, GatewayResponse};
use serde::Serialize;
use tracing::warn;

pub use app_config_and_utils::RATE_LIMIT_FALLBACK_SECS;

/// Message for calls that never got a response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error";

/// Outcome of one remote auth operation. Never retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum AuthResult {
    Success,
    RateLimited { retry_after_seconds: u32 },
    Failure { message: String },
}

impl AuthResult {
    pub fn failure(message: impl Into<String>) -> Self {
        AuthResult::Failure {
            message: message.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, AuthResult::Success)
    }
}

/// Maps HTTP responses onto [`AuthResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseClassifier {
    rate_limit_fallback_secs: u32,
}

impl Default for ResponseClassifier {
    fn default() -> Self {
        Self::new(RATE_LIMIT_FALLBACK_SECS)
    }
}

impl ResponseClassifier {
    pub fn new(rate_limit_fallback_secs: u32) -> Self {
        Self {
            rate_limit_fallback_secs,
        }
    }

    pub fn rate_limit_fallback_secs(&self) -> u32 {
        self.rate_limit_fallback_secs
    }

    /// 2xx is success, 429 is a rate limit, anything else fails as
    /// `"<failure_prefix> (<status>)"`.
    pub fn classify(&self, response: &GatewayResponse, failure_prefix: &str) -> AuthResult {
        if response.is_success() {
            return AuthResult::Success;
        }
        if response.status == 429 {
            return AuthResult::RateLimited {
                retry_after_seconds: response
                    .retry_after_seconds
                    .unwrap_or(self.rate_limit_fallback_secs),
            };
        }
        AuthResult::failure(format!("{} ({})", failure_prefix, response.status))
    }

    /// Classifies a gateway call, mapping transport errors to a network failure.
    pub fn classify_outcome(
        &self,
        outcome: Result<GatewayResponse, GatewayError>,
        failure_prefix: &str,
    ) -> AuthResult {
        match outcome {
            Ok(response) => self.classify(&response, failure_prefix),
            Err(err) => classify_transport(&err),
        }
    }
}

/// A call that produced no HTTP response.
pub fn classify_transport(err: &GatewayError) -> AuthResult {
    warn!(error = %err, transient = err.is_transient(), "Request did not complete");
    AuthResult::failure(NETWORK_ERROR_MESSAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_2xx_is_success() {
        let classifier = ResponseClassifier::default();
        assert_eq!(
            classifier.classify(&GatewayResponse::new(204), "Request failed"),
            AuthResult::Success
        );
    }

    #[test]
    fn test_429_uses_retry_after_header() {
        let classifier = ResponseClassifier::default();
        let response = GatewayResponse::new(429).with_retry_after(42);
        assert_eq!(
            classifier.classify(&response, "Request failed"),
            AuthResult::RateLimited {
                retry_after_seconds: 42
            }
        );
    }

    #[test]
    fn test_429_without_header_uses_fallback() {
        let classifier = ResponseClassifier::default();
        assert_eq!(
            classifier.classify(&GatewayResponse::new(429), "Request failed"),
            AuthResult::RateLimited {
                retry_after_seconds: RATE_LIMIT_FALLBACK_SECS
            }
        );

        let custom = ResponseClassifier::new(5);
        assert_eq!(
            custom.classify(&GatewayResponse::new(429), "Request failed"),
            AuthResult::RateLimited {
                retry_after_seconds: 5
            }
        );
    }

    #[test]
    fn test_default_classifier_matches_config_default() {
        let config = app_config_and_utils::Config::default();
        assert_eq!(
            ResponseClassifier::default().rate_limit_fallback_secs(),
            config.rate_limit_fallback_seconds
        );
    }

    #[test]
    fn test_other_status_is_prefixed_failure() {
        let classifier = ResponseClassifier::default();
        assert_eq!(
            classifier.classify(&GatewayResponse::new(500), "Request failed"),
            AuthResult::failure("Request failed (500)")
        );
        assert_eq!(
            classifier.classify(&GatewayResponse::new(401), "Logout failed"),
            AuthResult::failure("Logout failed (401)")
        );
    }

    #[test]
    fn test_transport_error_is_network_error() {
        let classifier = ResponseClassifier::default();
        let outcome = Err(GatewayError::Config("unreachable".to_string()));
        assert_eq!(
            classifier.classify_outcome(outcome, "Request failed"),
            AuthResult::failure(NETWORK_ERROR_MESSAGE)
        );
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(AuthResult::RateLimited {
            retry_after_seconds: 7,
        })
        .unwrap();
        assert_eq!(json["result"], "rate_limited");
        assert_eq!(json["retry_after_seconds"], 7);
    }
}
