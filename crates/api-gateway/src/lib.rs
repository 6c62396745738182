//! HTTP gateway for the template backends.
//!
//! [`HttpGateway`] is the single seam through which auth and billing talk to
//! the network. Responses are classified into the shared [`AuthResult`]
//! vocabulary by [`ResponseClassifier`]; transport faults never cross the
//! controller boundary as errors.

mod error;
mod gateway;
mod reqwest_gateway;
mod taxonomy;

pub use error::{GatewayError, GatewayResult};
pub use gateway::{GatewayResponse, HttpGateway};
pub use reqwest_gateway::ReqwestGateway;
pub use taxonomy::{
    classify_transport, AuthResult, ResponseClassifier, NETWORK_ERROR_MESSAGE,
    RATE_LIMIT_FALLBACK_SECS,
};
