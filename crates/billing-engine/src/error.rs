//! Billing engine setup errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BillingEngineError {
    /// The sync gateway could not be constructed.
    #[error("Gateway error: {0}")]
    Gateway(#[from] api_gateway::GatewayError),
}

pub type BillingEngineResult<T> = Result<T, BillingEngineError>;
