//! Email one-time-code flow controller.

use crate::otp_rules::{is_complete_code, is_plausible_email};
use crate::AuthRepository;
use api_gateway::AuthResult;
use app_config_and_utils::DEFAULT_OTP_COOLDOWN_SECONDS;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OtpFlowState {
    Idle,
    SendingCode,
    /// A code went to `email`; resending is blocked for `cooldown_seconds`.
    SentCode { email: String, cooldown_seconds: u32 },
    VerifyingCode,
    VerifiedSuccess,
    RateLimited { retry_after_seconds: u32 },
    Error { message: String },
}

impl OtpFlowState {
    fn error(message: impl Into<String>) -> Self {
        OtpFlowState::Error {
            message: message.into(),
        }
    }

    /// Remaining resend cooldown, only when the code was sent to `email`.
    pub fn cooldown_for(&self, email: &str) -> Option<u32> {
        match self {
            OtpFlowState::SentCode {
                email: sent_to,
                cooldown_seconds,
            } if sent_to == email => Some(*cooldown_seconds),
            _ => None,
        }
    }
}

/// Drives the request/verify exchange for one email login.
pub struct OtpFlow {
    repository: Arc<dyn AuthRepository>,
    cooldown_seconds: u32,
    state: OtpFlowState,
}

impl OtpFlow {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self::with_cooldown(repository, DEFAULT_OTP_COOLDOWN_SECONDS)
    }

    pub fn with_cooldown(repository: Arc<dyn AuthRepository>, cooldown_seconds: u32) -> Self {
        Self {
            repository,
            cooldown_seconds,
            state: OtpFlowState::Idle,
        }
    }

    pub fn state(&self) -> &OtpFlowState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            OtpFlowState::SendingCode | OtpFlowState::VerifyingCode
        )
    }

    fn set_state(&mut self, next: OtpFlowState) -> OtpFlowState {
        debug!(old_state = ?self.state, new_state = ?next, "OTP transition");
        self.state = next;
        self.state.clone()
    }

    /// Ask the backend to email a code. Malformed emails never reach the network.
    pub async fn send_code(&mut self, email: &str) -> OtpFlowState {
        if !is_plausible_email(email) {
            return self.set_state(OtpFlowState::error("Please enter a valid email"));
        }

        self.set_state(OtpFlowState::SendingCode);
        let next = match self.repository.request_otp(email).await {
            AuthResult::Success => {
                info!("Verification code sent");
                OtpFlowState::SentCode {
                    email: email.to_string(),
                    cooldown_seconds: self.cooldown_seconds,
                }
            }
            AuthResult::RateLimited {
                retry_after_seconds,
            } => {
                warn!(retry_after_seconds, "OTP request rate limited");
                OtpFlowState::RateLimited {
                    retry_after_seconds,
                }
            }
            AuthResult::Failure { message } => OtpFlowState::Error { message },
        };
        self.set_state(next)
    }

    /// Check a 6-digit code. Anything else fails locally.
    pub async fn verify_code(&mut self, email: &str, code: &str) -> OtpFlowState {
        if !is_complete_code(code) {
            return self.set_state(OtpFlowState::error("Invalid verification code"));
        }

        self.set_state(OtpFlowState::VerifyingCode);
        let next = match self.repository.verify_otp(email, code).await {
            AuthResult::Success => {
                info!("Email login verified");
                OtpFlowState::VerifiedSuccess
            }
            AuthResult::RateLimited {
                retry_after_seconds,
            } => {
                warn!(retry_after_seconds, "OTP verification rate limited");
                OtpFlowState::RateLimited {
                    retry_after_seconds,
                }
            }
            AuthResult::Failure { message } => OtpFlowState::Error { message },
        };
        self.set_state(next)
    }
}
