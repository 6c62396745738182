//! Reconciliation of store purchases with the billing backend.

use crate::{BillingEngineResult, BillingSyncResult, StorePurchase};
use api_gateway::{HttpGateway, ReqwestGateway};
use app_config_and_utils::BillingContract;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const SYNC_PLATFORM: &str = "android";

/// Reports a store purchase to the backend ledger.
#[async_trait]
pub trait BillingSync: Send + Sync {
    /// One attempt, never retried.
    async fn sync_purchase(&self, purchase: &StorePurchase) -> BillingSyncResult;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BillingSyncPayload<'a> {
    platform: &'a str,
    store_product_id: &'a str,
    store_transaction_id: &'a str,
    external_order_id: Option<&'a str>,
    status: &'a str,
    purchased_at: Option<&'a str>,
    expires_at: Option<&'a str>,
    canceled_at: Option<&'a str>,
    refunded_at: Option<&'a str>,
    raw: BillingSyncRaw<'a>,
}

/// Untouched store fields, kept for backend debugging.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BillingSyncRaw<'a> {
    purchase_token: &'a str,
    order_id: Option<&'a str>,
    package_name: Option<&'a str>,
    purchase_time: Option<&'a str>,
    purchase_state: &'a str,
    acknowledged: bool,
    auto_renewing: bool,
    original_json: Option<&'a str>,
    signature: Option<&'a str>,
}

impl<'a> BillingSyncPayload<'a> {
    fn from_purchase(purchase: &'a StorePurchase) -> Self {
        Self {
            platform: SYNC_PLATFORM,
            store_product_id: &purchase.product_id,
            store_transaction_id: &purchase.purchase_token,
            external_order_id: purchase.order_id.as_deref(),
            status: purchase.purchase_state.sync_status(),
            purchased_at: purchase.purchase_time.as_deref(),
            expires_at: purchase.expires_at.as_deref(),
            canceled_at: purchase.canceled_at.as_deref(),
            refunded_at: purchase.refunded_at.as_deref(),
            raw: BillingSyncRaw {
                purchase_token: &purchase.purchase_token,
                order_id: purchase.order_id.as_deref(),
                package_name: purchase.package_name.as_deref(),
                purchase_time: purchase.purchase_time.as_deref(),
                purchase_state: purchase.purchase_state.name(),
                acknowledged: purchase.acknowledged,
                auto_renewing: purchase.auto_renewing,
                original_json: purchase.original_json.as_deref(),
                signature: purchase.signature.as_deref(),
            },
        }
    }
}

type BearerTokenProvider = Box<dyn Fn() -> Option<String> + Send + Sync>;

/// POSTs each purchase to the sync endpoint.
pub struct BillingSyncRepository {
    gateway: Arc<dyn HttpGateway>,
    bearer_token_provider: BearerTokenProvider,
    sync_enabled: bool,
}

impl BillingSyncRepository {
    pub fn new<F>(gateway: Arc<dyn HttpGateway>, bearer_token_provider: F, sync_enabled: bool) -> Self
    where
        F: Fn() -> Option<String> + Send + Sync + 'static,
    {
        Self {
            gateway,
            bearer_token_provider: Box::new(bearer_token_provider),
            sync_enabled,
        }
    }
}

#[async_trait]
impl BillingSync for BillingSyncRepository {
    async fn sync_purchase(&self, purchase: &StorePurchase) -> BillingSyncResult {
        if !self.sync_enabled {
            debug!(product_id = %purchase.product_id, "Billing sync disabled; skipping");
            return BillingSyncResult::Skipped;
        }

        let body = match serde_json::to_value(BillingSyncPayload::from_purchase(purchase)) {
            Ok(body) => body,
            Err(err) => {
                error!(error = %err, "Failed to encode billing sync payload");
                return BillingSyncResult::Failure { code: None };
            }
        };

        let bearer = (self.bearer_token_provider)().filter(|token| !token.trim().is_empty());
        match self
            .gateway
            .post_json(BillingContract::SYNC_ENDPOINT, bearer.as_deref(), &body)
            .await
        {
            Ok(response) if response.is_success() => {
                info!(product_id = %purchase.product_id, status = purchase.purchase_state.sync_status(), "Purchase synced");
                BillingSyncResult::Success
            }
            Ok(response) => {
                warn!(product_id = %purchase.product_id, code = response.status, "Billing sync rejected");
                BillingSyncResult::Failure {
                    code: Some(response.status),
                }
            }
            Err(err) => {
                warn!(product_id = %purchase.product_id, error = %err, "Billing sync did not complete");
                BillingSyncResult::Failure { code: None }
            }
        }
    }
}

/// Sync service that never calls out.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopBillingSync;

#[async_trait]
impl BillingSync for NoopBillingSync {
    async fn sync_purchase(&self, _purchase: &StorePurchase) -> BillingSyncResult {
        BillingSyncResult::Skipped
    }
}

/// [`NoopBillingSync`] when sync is off or no API base URL is set, otherwise
/// a [`BillingSyncRepository`] sending `bearer_token` when it is non-blank.
pub fn create_billing_sync_service(
    api_base_url: &str,
    sync_enabled: bool,
    bearer_token: Option<String>,
) -> BillingEngineResult<Arc<dyn BillingSync>> {
    if !sync_enabled || api_base_url.trim().is_empty() {
        debug!(sync_enabled, "Using no-op billing sync");
        return Ok(Arc::new(NoopBillingSync));
    }

    let gateway = ReqwestGateway::new(api_base_url)?;
    let bearer_token = bearer_token.filter(|token| !token.trim().is_empty());
    Ok(Arc::new(BillingSyncRepository::new(
        Arc::new(gateway),
        move || bearer_token.clone(),
        true,
    )))
}
