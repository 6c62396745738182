//! Store billing backend contract.

use crate::{BillingProduct, StorePurchase, StorePurchaseOutcome};
use async_trait::async_trait;

/// The platform store: catalog lookup, purchase and restore.
#[async_trait]
pub trait BillingStore: Send + Sync {
    /// Products known to the store among `product_ids`, in any order.
    async fn query_products(&self, product_ids: &[String]) -> Vec<BillingProduct>;

    async fn purchase(&self, product_id: &str) -> StorePurchaseOutcome;

    /// Purchases the store still holds for this user.
    async fn restore(&self) -> Vec<StorePurchase>;
}
