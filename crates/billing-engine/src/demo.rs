//! Offline store used when no real store is wired in.

use crate::{
    BillingProduct, BillingProductType, BillingStore, StorePurchase, StorePurchaseOutcome,
    StorePurchaseState,
};
use app_config_and_utils::BillingContract;
use async_trait::async_trait;
use tracing::debug;

const DEMO_PACKAGE_NAME: &str = "com.example.template";

/// Canned store: subscriptions are `monthly` and `annual`, everything else is
/// a one-time product. Buying `remove_ads` stays pending.
#[derive(Debug, Clone, Default)]
pub struct DemoBillingStore;

impl DemoBillingStore {
    pub fn new() -> Self {
        Self
    }

    fn product_type(product_id: &str) -> BillingProductType {
        match product_id {
            "monthly" | "annual" => BillingProductType::Subscription,
            _ => BillingProductType::OneTime,
        }
    }
}

#[async_trait]
impl BillingStore for DemoBillingStore {
    async fn query_products(&self, product_ids: &[String]) -> Vec<BillingProduct> {
        product_ids
            .iter()
            .filter(|id| BillingContract::catalog_rank(id).is_some())
            .map(|id| BillingProduct::new(id.clone(), Self::product_type(id)))
            .collect()
    }

    async fn purchase(&self, product_id: &str) -> StorePurchaseOutcome {
        debug!(product_id, "Demo store purchase");
        if product_id == "remove_ads" {
            return StorePurchaseOutcome::Pending;
        }

        let mut purchase = StorePurchase::new(
            product_id,
            format!("token-{}", product_id),
            Some(format!("order-{}", product_id)),
            StorePurchaseState::Purchased,
        );
        purchase.package_name = Some(DEMO_PACKAGE_NAME.to_string());
        StorePurchaseOutcome::Success { purchase }
    }

    async fn restore(&self) -> Vec<StorePurchase> {
        let mut purchase = StorePurchase::new(
            "monthly",
            "restore-monthly-token",
            Some("restore-monthly-order".to_string()),
            StorePurchaseState::Purchased,
        );
        purchase.package_name = Some(DEMO_PACKAGE_NAME.to_string());
        vec![purchase]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_demo_catalog_types() {
        let products = DemoBillingStore::new()
            .query_products(&BillingContract::product_ids())
            .await;
        let types: Vec<_> = products.iter().map(|p| (p.id.as_str(), p.product_type)).collect();
        assert_eq!(
            types,
            vec![
                ("monthly", BillingProductType::Subscription),
                ("annual", BillingProductType::Subscription),
                ("remove_ads", BillingProductType::OneTime),
                ("lifetime", BillingProductType::OneTime),
            ]
        );
    }

    #[tokio::test]
    async fn test_demo_catalog_ignores_unknown_ids() {
        let products = DemoBillingStore::new()
            .query_products(&["weekly".to_string(), "annual".to_string()])
            .await;
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "annual");
    }

    #[tokio::test]
    async fn test_demo_purchase() {
        let store = DemoBillingStore::new();
        assert_eq!(store.purchase("remove_ads").await, StorePurchaseOutcome::Pending);

        match store.purchase("lifetime").await {
            StorePurchaseOutcome::Success { purchase } => {
                assert_eq!(purchase.purchase_token, "token-lifetime");
                assert_eq!(purchase.order_id.as_deref(), Some("order-lifetime"));
                assert_eq!(purchase.package_name.as_deref(), Some(DEMO_PACKAGE_NAME));
                assert_eq!(purchase.purchase_state, StorePurchaseState::Purchased);
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_demo_restore() {
        let restored = DemoBillingStore::new().restore().await;
        assert_eq!(restored.len(), 1);
        assert_eq!(restored[0].product_id, "monthly");
        assert_eq!(restored[0].purchase_token, "restore-monthly-token");
        assert_eq!(restored[0].order_id.as_deref(), Some("restore-monthly-order"));
    }
}
