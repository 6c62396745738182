//! Purchase flow controller.

use crate::{
    BillingProduct, BillingStore, BillingSync, BillingSyncResult, StorePurchase,
    StorePurchaseOutcome,
};
use app_config_and_utils::BillingContract;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Whether the backend ledger accepted the purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaywallSyncStatus {
    Synced,
    /// Store purchase succeeded; only the ledger write failed.
    SyncFailed,
}

impl PaywallSyncStatus {
    fn from_results<'a>(results: impl IntoIterator<Item = &'a BillingSyncResult>) -> Self {
        if results.into_iter().any(BillingSyncResult::is_failure) {
            PaywallSyncStatus::SyncFailed
        } else {
            PaywallSyncStatus::Synced
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BillingOperation {
    Purchase { product_id: String },
    Restore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum PaywallResult {
    Purchased {
        product_id: String,
        sync_status: PaywallSyncStatus,
    },
    Restored {
        count: usize,
        sync_status: PaywallSyncStatus,
    },
    Cancelled,
    Pending,
    Failed {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaywallState {
    Idle,
    LoadingProducts,
    Processing {
        operation: BillingOperation,
    },
    Ready {
        products: Vec<BillingProduct>,
        last_result: Option<PaywallResult>,
    },
}

/// Drives catalog load, purchase and restore against one store.
///
/// `purchase` and `restore_purchases` called before the catalog is loaded
/// load it first.
pub struct PaywallFlow {
    store: Arc<dyn BillingStore>,
    sync: Arc<dyn BillingSync>,
    state: PaywallState,
}

impl PaywallFlow {
    pub fn new(store: Arc<dyn BillingStore>, sync: Arc<dyn BillingSync>) -> Self {
        Self {
            store,
            sync,
            state: PaywallState::Idle,
        }
    }

    pub fn state(&self) -> &PaywallState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            PaywallState::LoadingProducts | PaywallState::Processing { .. }
        )
    }

    fn set_state(&mut self, next: PaywallState) -> PaywallState {
        debug!(old_state = ?self.state, new_state = ?next, "Paywall transition");
        self.state = next;
        self.state.clone()
    }

    async fn fetch_catalog(&self) -> Vec<BillingProduct> {
        let mut products = self
            .store
            .query_products(&BillingContract::product_ids())
            .await;
        products.sort_by_key(|product| {
            BillingContract::catalog_rank(&product.id).unwrap_or(usize::MAX)
        });
        products
    }

    /// Query the fixed catalog and present it in catalog order.
    pub async fn load_products(&mut self) -> PaywallState {
        self.set_state(PaywallState::LoadingProducts);
        let products = self.fetch_catalog().await;
        info!(count = products.len(), "Catalog loaded");
        self.set_state(PaywallState::Ready {
            products,
            last_result: None,
        })
    }

    async fn ready_products(&mut self) -> Vec<BillingProduct> {
        if let PaywallState::Ready { products, .. } = &self.state {
            return products.clone();
        }
        debug!("Catalog not loaded; loading before operation");
        match self.load_products().await {
            PaywallState::Ready { products, .. } => products,
            _ => Vec::new(),
        }
    }

    fn finish(&mut self, products: Vec<BillingProduct>, result: PaywallResult) -> PaywallState {
        self.set_state(PaywallState::Ready {
            products,
            last_result: Some(result),
        })
    }

    pub async fn purchase(&mut self, product_id: &str) -> PaywallState {
        let products = self.ready_products().await;
        self.set_state(PaywallState::Processing {
            operation: BillingOperation::Purchase {
                product_id: product_id.to_string(),
            },
        });

        let result = match self.store.purchase(product_id).await {
            StorePurchaseOutcome::Success { purchase } => {
                let sync_result = self.sync.sync_purchase(&purchase).await;
                let sync_status = PaywallSyncStatus::from_results([&sync_result]);
                if sync_status == PaywallSyncStatus::SyncFailed {
                    warn!(product_id = %purchase.product_id, ?sync_result, "Purchase completed but ledger sync failed");
                } else {
                    info!(product_id = %purchase.product_id, "Purchase completed");
                }
                PaywallResult::Purchased {
                    product_id: purchase.product_id,
                    sync_status,
                }
            }
            StorePurchaseOutcome::Cancelled => {
                info!(product_id, "Purchase cancelled");
                PaywallResult::Cancelled
            }
            StorePurchaseOutcome::Pending => {
                info!(product_id, "Purchase pending");
                PaywallResult::Pending
            }
            StorePurchaseOutcome::Failed { message } => {
                warn!(product_id, %message, "Purchase failed");
                PaywallResult::Failed { message }
            }
        };
        self.finish(products, result)
    }

    /// Restore and sync every purchase; one failed sync marks the whole restore.
    pub async fn restore_purchases(&mut self) -> PaywallState {
        let products = self.ready_products().await;
        self.set_state(PaywallState::Processing {
            operation: BillingOperation::Restore,
        });

        let restored = self.store.restore().await;
        let result = if restored.is_empty() {
            info!("Nothing to restore");
            PaywallResult::Failed {
                message: "No purchases found".to_string(),
            }
        } else {
            let sync_results = self.sync_all(&restored).await;
            let sync_status = PaywallSyncStatus::from_results(&sync_results);
            if sync_status == PaywallSyncStatus::SyncFailed {
                let failed = sync_results.iter().filter(|r| r.is_failure()).count();
                warn!(count = restored.len(), failed, "Restore completed with sync failures");
            } else {
                info!(count = restored.len(), "Restore completed");
            }
            PaywallResult::Restored {
                count: restored.len(),
                sync_status,
            }
        };
        self.finish(products, result)
    }

    async fn sync_all(&self, purchases: &[StorePurchase]) -> Vec<BillingSyncResult> {
        let mut results = Vec::with_capacity(purchases.len());
        for purchase in purchases {
            results.push(self.sync.sync_purchase(purchase).await);
        }
        results
    }
}
