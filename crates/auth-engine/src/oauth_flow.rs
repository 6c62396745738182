//! OAuth login flow controller.

use crate::oauth_fsm::{OAuthMachine, OAuthMachineInput, OAuthMachineState};
use crate::{AuthCallbackReceiver, AuthRepository, OAuthProvider};
use api_gateway::AuthResult;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// What the UI should render for the OAuth login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum OAuthFlowState {
    Idle,
    /// Open `url` in the browser.
    LaunchBrowser { url: String },
    HandlingCallback,
    Authenticated,
    Error { message: String },
}

impl OAuthFlowState {
    fn error(message: impl Into<String>) -> Self {
        OAuthFlowState::Error {
            message: message.into(),
        }
    }
}

/// Drives one OAuth login. Operations take `&mut self`, so a flow never has
/// two operations in flight.
pub struct OAuthFlow {
    repository: Arc<dyn AuthRepository>,
    state: OAuthFlowState,
    machine: OAuthMachine,
    callbacks: Option<AuthCallbackReceiver>,
}

impl OAuthFlow {
    pub fn new(repository: Arc<dyn AuthRepository>) -> Self {
        Self {
            repository,
            state: OAuthFlowState::Idle,
            machine: OAuthMachine::new(),
            callbacks: None,
        }
    }

    /// Attach the receiving end of an [`AuthCallbackBus`](crate::AuthCallbackBus).
    pub fn with_callback_receiver(mut self, receiver: AuthCallbackReceiver) -> Self {
        self.callbacks = Some(receiver);
        self
    }

    pub fn state(&self) -> &OAuthFlowState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, OAuthFlowState::HandlingCallback)
    }

    fn transition(&mut self, input: OAuthMachineInput, next: OAuthFlowState) -> bool {
        let old_phase = self.machine.state().clone();
        match self.machine.consume(&input) {
            Ok(_) => {
                debug!(old_phase = ?old_phase, new_phase = ?self.machine.state(), "OAuth transition");
                self.state = next;
                true
            }
            Err(_) => {
                warn!(phase = ?old_phase, input = ?input, "Ignoring OAuth input in this phase");
                false
            }
        }
    }

    /// Resolve the authorize URL for `provider`.
    pub fn start(&mut self, provider: OAuthProvider) -> OAuthFlowState {
        match self
            .repository
            .build_oauth_authorize_url(provider)
            .filter(|url| !url.trim().is_empty())
        {
            Some(url) => {
                info!(%provider, "Launching OAuth browser login");
                self.transition(OAuthMachineInput::Start, OAuthFlowState::LaunchBrowser { url });
            }
            None => {
                warn!(%provider, "OAuth is not configured");
                self.transition(
                    OAuthMachineInput::MissingConfig,
                    OAuthFlowState::error("Missing OAuth configuration"),
                );
            }
        }
        self.state.clone()
    }

    /// Complete the login from a redirect URI.
    ///
    /// Ignored, with the state left unchanged, once the flow is authenticated.
    pub async fn handle_callback(&mut self, callback_uri: &str) -> OAuthFlowState {
        if !self.transition(OAuthMachineInput::CallbackReceived, OAuthFlowState::HandlingCallback) {
            return self.state.clone();
        }

        let (input, next) = match self.repository.complete_oauth_callback(callback_uri).await {
            AuthResult::Success => {
                info!("OAuth login authenticated");
                (OAuthMachineInput::CallbackSucceeded, OAuthFlowState::Authenticated)
            }
            AuthResult::RateLimited {
                retry_after_seconds,
            } => (
                OAuthMachineInput::CallbackFailed,
                OAuthFlowState::error(format!(
                    "Too many requests. Retry in {}s",
                    retry_after_seconds
                )),
            ),
            AuthResult::Failure { message } => {
                (OAuthMachineInput::CallbackFailed, OAuthFlowState::error(message))
            }
        };
        self.transition(input, next);
        self.state.clone()
    }

    /// Wait for the next URI on the attached callback bus and handle it.
    ///
    /// `None` when no receiver is attached or every bus handle is gone.
    pub async fn next_callback(&mut self) -> Option<OAuthFlowState> {
        let callback_uri = self.callbacks.as_mut()?.recv().await?;
        Some(self.handle_callback(&callback_uri).await)
    }
}
