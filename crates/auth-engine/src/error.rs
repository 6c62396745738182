//! Auth engine setup errors.
//!
//! Flow operations never fail with these; they report outcomes as
//! [`AuthResult`](api_gateway::AuthResult) and flow state instead.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthEngineError {
    /// The remote gateway could not be constructed.
    #[error("Gateway error: {0}")]
    Gateway(#[from] api_gateway::GatewayError),
}

pub type AuthEngineResult<T> = Result<T, AuthEngineError>;
