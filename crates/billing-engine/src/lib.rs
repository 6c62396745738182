//! Purchase, restore and entitlement-sync flows.
//!
//! [`PaywallFlow`] loads the catalog from a [`BillingStore`], runs purchases
//! and restores, and reconciles every store purchase with the backend ledger
//! through a [`BillingSync`]. A purchase whose sync fails is still a purchase;
//! it is reported as [`PaywallSyncStatus::SyncFailed`].

mod demo;
mod error;
pub mod history;
mod model;
mod paywall;
pub mod presentation;
mod store;
mod sync;

#[cfg(test)]
mod testing;

pub use demo::DemoBillingStore;
pub use error::{BillingEngineError, BillingEngineResult};
pub use model::{
    BillingProduct, BillingProductType, BillingSyncResult, StorePurchase, StorePurchaseOutcome,
    StorePurchaseState,
};
pub use paywall::{BillingOperation, PaywallFlow, PaywallResult, PaywallState, PaywallSyncStatus};
pub use presentation::{PaywallEvent, PaywallStore, PaywallUiModel, UiState, PAYWALL_SHEET_ID};
pub use store::BillingStore;
pub use sync::{create_billing_sync_service, BillingSync, BillingSyncRepository, NoopBillingSync};
