//! Core types, configuration, and utilities shared by the template flow crates.

mod config;
pub mod contracts;
mod error;
mod logging;
mod paths;

pub use config::{
    Config, DEFAULT_LOG_LEVEL, DEFAULT_OTP_COOLDOWN_SECONDS, RATE_LIMIT_FALLBACK_SECS,
};
pub use contracts::{AuthContract, BillingContract};
pub use error::{CoreError, CoreResult};
pub use logging::{init_logging, init_logging_for_service};
pub use paths::Paths;
