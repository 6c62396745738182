//! Passwordless authentication flows.
//!
//! - [`OAuthFlow`]: authorize-URL launch and redirect callback handling
//! - [`OtpFlow`]: email one-time-code request and verification
//!
//! Both flows talk to an [`AuthRepository`]: [`RemoteAuthRepository`] against a
//! real auth backend, [`DemoAuthRepository`] for offline runs, chosen by
//! [`ConfigurableAuthRepository`].

mod callback;
mod callback_bus;
mod configurable;
mod demo;
mod error;
mod oauth_flow;
mod oauth_fsm;
pub mod otp_rules;
mod otp_flow;
mod provider;
mod remote;
mod repository;

#[cfg(test)]
mod testing;

pub use callback::parse_callback_parameters;
pub use callback_bus::{auth_callback_channel, AuthCallbackBus, AuthCallbackReceiver};
pub use configurable::{build_auth_repository, ConfigurableAuthRepository};
pub use demo::DemoAuthRepository;
pub use error::{AuthEngineError, AuthEngineResult};
pub use oauth_flow::{OAuthFlow, OAuthFlowState};
pub use oauth_fsm::{OAuthMachine, OAuthMachineInput, OAuthMachineState};
pub use otp_flow::{OtpFlow, OtpFlowState};
pub use provider::OAuthProvider;
pub use remote::RemoteAuthRepository;
pub use repository::AuthRepository;

pub use api_gateway::AuthResult;
