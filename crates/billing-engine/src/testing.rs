//! Recording fakes for the billing collaborators.

use crate::{
    BillingProduct, BillingProductType, BillingStore, BillingSync, BillingSyncResult,
    StorePurchase, StorePurchaseOutcome, StorePurchaseState,
};
use api_gateway::{GatewayError, GatewayResponse, GatewayResult, HttpGateway};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

#[derive(Debug, Clone)]
pub struct RecordedPost {
    pub path: String,
    pub bearer_token: Option<String>,
    pub body: serde_json::Value,
}

/// Replays scripted responses; `None` entries simulate a transport failure.
#[derive(Default)]
pub struct FakeGateway {
    responses: Mutex<VecDeque<Option<GatewayResponse>>>,
    pub posts: Mutex<Vec<RecordedPost>>,
}

impl FakeGateway {
    pub fn with_responses(responses: Vec<Option<GatewayResponse>>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            posts: Mutex::new(Vec::new()),
        }
    }

    pub fn post_count(&self) -> usize {
        self.posts.lock().unwrap().len()
    }

    pub fn last_post(&self) -> Option<RecordedPost> {
        self.posts.lock().unwrap().last().cloned()
    }
}

#[async_trait]
impl HttpGateway for FakeGateway {
    async fn post_json(
        &self,
        path: &str,
        bearer_token: Option<&str>,
        body: &serde_json::Value,
    ) -> GatewayResult<GatewayResponse> {
        self.posts.lock().unwrap().push(RecordedPost {
            path: path.to_string(),
            bearer_token: bearer_token.map(str::to_string),
            body: body.clone(),
        });
        match self.responses.lock().unwrap().pop_front() {
            Some(Some(response)) => Ok(response),
            Some(None) => Err(GatewayError::Config("simulated transport failure".to_string())),
            None => Ok(GatewayResponse::new(200)),
        }
    }
}

pub fn purchase_of(product_id: &str) -> StorePurchase {
    StorePurchase::new(
        product_id,
        format!("token-{}", product_id),
        Some(format!("order-{}", product_id)),
        StorePurchaseState::Purchased,
    )
}

/// Store returning a fixed catalog in the order given, with scripted outcomes.
pub struct FakeBillingStore {
    pub catalog: Vec<BillingProduct>,
    pub purchase_outcome: StorePurchaseOutcome,
    pub restored: Vec<StorePurchase>,
    pub query_calls: Mutex<usize>,
    pub purchase_calls: Mutex<Vec<String>>,
    pub restore_calls: Mutex<usize>,
}

impl Default for FakeBillingStore {
    fn default() -> Self {
        Self {
            catalog: vec![
                BillingProduct::new("lifetime", BillingProductType::OneTime),
                BillingProduct::new("annual", BillingProductType::Subscription),
                BillingProduct::new("monthly", BillingProductType::Subscription),
            ],
            purchase_outcome: StorePurchaseOutcome::Cancelled,
            restored: Vec::new(),
            query_calls: Mutex::new(0),
            purchase_calls: Mutex::new(Vec::new()),
            restore_calls: Mutex::new(0),
        }
    }
}

impl FakeBillingStore {
    pub fn query_count(&self) -> usize {
        *self.query_calls.lock().unwrap()
    }

    pub fn purchase_count(&self) -> usize {
        self.purchase_calls.lock().unwrap().len()
    }

    pub fn restore_count(&self) -> usize {
        *self.restore_calls.lock().unwrap()
    }
}

#[async_trait]
impl BillingStore for FakeBillingStore {
    async fn query_products(&self, _product_ids: &[String]) -> Vec<BillingProduct> {
        *self.query_calls.lock().unwrap() += 1;
        self.catalog.clone()
    }

    async fn purchase(&self, product_id: &str) -> StorePurchaseOutcome {
        self.purchase_calls.lock().unwrap().push(product_id.to_string());
        self.purchase_outcome.clone()
    }

    async fn restore(&self) -> Vec<StorePurchase> {
        *self.restore_calls.lock().unwrap() += 1;
        self.restored.clone()
    }
}

/// Sync replaying scripted results, then `Success` once the script runs out.
#[derive(Default)]
pub struct FakeBillingSync {
    results: Mutex<VecDeque<BillingSyncResult>>,
    pub synced: Mutex<Vec<String>>,
}

impl FakeBillingSync {
    pub fn with_results(results: Vec<BillingSyncResult>) -> Self {
        Self {
            results: Mutex::new(results.into()),
            synced: Mutex::new(Vec::new()),
        }
    }

    pub fn sync_count(&self) -> usize {
        self.synced.lock().unwrap().len()
    }
}

#[async_trait]
impl BillingSync for FakeBillingSync {
    async fn sync_purchase(&self, purchase: &StorePurchase) -> BillingSyncResult {
        self.synced.lock().unwrap().push(purchase.product_id.clone());
        self.results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(BillingSyncResult::Success)
    }
}
