//! UI-facing wrapper around [`PaywallFlow`].
//!
//! [`PaywallStore`] turns flow states into [`UiState<PaywallUiModel>`] and
//! announces every finished purchase or restore as a [`PaywallEvent`].

use crate::{BillingProduct, PaywallFlow, PaywallResult, PaywallState, PaywallSyncStatus};
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::debug;

/// Sheet id carried by [`PaywallEvent::DismissSheet`].
pub const PAYWALL_SHEET_ID: &str = "paywall";

const EVENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "data", rename_all = "snake_case")]
pub enum UiState<T> {
    Idle,
    Loading,
    Success(T),
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaywallUiModel {
    pub products: Vec<BillingProduct>,
    pub is_processing: bool,
    pub last_result: Option<PaywallResult>,
    pub result_message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum PaywallEvent {
    DismissSheet(String),
    ShowSnackbar(String),
}

/// Text shown to the user for a finished operation.
pub fn user_message(result: &PaywallResult) -> String {
    match result {
        PaywallResult::Purchased {
            product_id,
            sync_status: PaywallSyncStatus::Synced,
        } => format!("Purchase completed: {}", product_id),
        PaywallResult::Purchased {
            product_id,
            sync_status: PaywallSyncStatus::SyncFailed,
        } => format!("Purchase completed, but sync failed: {}", product_id),
        PaywallResult::Restored {
            count,
            sync_status: PaywallSyncStatus::Synced,
        } => format!("Restored {} purchase(s)", count),
        PaywallResult::Restored {
            count,
            sync_status: PaywallSyncStatus::SyncFailed,
        } => format!("Restored {} purchase(s), but sync failed", count),
        PaywallResult::Cancelled => "Purchase cancelled".to_string(),
        PaywallResult::Pending => "Purchase is pending".to_string(),
        PaywallResult::Failed { message } => message.clone(),
    }
}

fn result_event(result: &PaywallResult) -> PaywallEvent {
    match result {
        PaywallResult::Purchased { .. } | PaywallResult::Restored { .. } => {
            PaywallEvent::DismissSheet(PAYWALL_SHEET_ID.to_string())
        }
        PaywallResult::Cancelled | PaywallResult::Pending | PaywallResult::Failed { .. } => {
            PaywallEvent::ShowSnackbar(user_message(result))
        }
    }
}

pub struct PaywallStore {
    flow: PaywallFlow,
    state: UiState<PaywallUiModel>,
    events: broadcast::Sender<PaywallEvent>,
}

impl PaywallStore {
    pub fn new(flow: PaywallFlow) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            flow,
            state: UiState::Idle,
            events,
        }
    }

    pub fn state(&self) -> &UiState<PaywallUiModel> {
        &self.state
    }

    pub fn subscribe(&self) -> broadcast::Receiver<PaywallEvent> {
        self.events.subscribe()
    }

    fn to_ui_state(&self, state: &PaywallState) -> UiState<PaywallUiModel> {
        match state {
            PaywallState::Idle => UiState::Idle,
            PaywallState::LoadingProducts | PaywallState::Processing { .. } => UiState::Loading,
            PaywallState::Ready {
                products,
                last_result,
            } => UiState::Success(PaywallUiModel {
                products: products.clone(),
                is_processing: self.flow.is_busy(),
                last_result: last_result.clone(),
                result_message: last_result.as_ref().map(user_message),
            }),
        }
    }

    pub async fn load(&mut self) -> &UiState<PaywallUiModel> {
        self.state = UiState::Loading;
        let next = self.flow.load_products().await;
        self.state = self.to_ui_state(&next);
        &self.state
    }

    pub async fn purchase(&mut self, product_id: &str) -> &UiState<PaywallUiModel> {
        let next = self.flow.purchase(product_id).await;
        self.settle(next)
    }

    pub async fn restore_purchases(&mut self) -> &UiState<PaywallUiModel> {
        let next = self.flow.restore_purchases().await;
        self.settle(next)
    }

    fn settle(&mut self, next: PaywallState) -> &UiState<PaywallUiModel> {
        self.state = self.to_ui_state(&next);
        if let PaywallState::Ready {
            last_result: Some(result),
            ..
        } = &next
        {
            let event = result_event(result);
            // No subscribers is fine.
            if self.events.send(event.clone()).is_err() {
                debug!(?event, "Paywall event dropped; no subscribers");
            }
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{purchase_of, FakeBillingStore, FakeBillingSync};
    use crate::{BillingSyncResult, StorePurchaseOutcome};
    use std::sync::Arc;

    fn store_with(store: FakeBillingStore, sync: FakeBillingSync) -> PaywallStore {
        PaywallStore::new(PaywallFlow::new(Arc::new(store), Arc::new(sync)))
    }

    fn model(state: &UiState<PaywallUiModel>) -> &PaywallUiModel {
        match state {
            UiState::Success(model) => model,
            other => panic!("unexpected ui state: {:?}", other),
        }
    }

    #[test]
    fn test_user_messages() {
        let cases = [
            (
                PaywallResult::Purchased {
                    product_id: "annual".into(),
                    sync_status: PaywallSyncStatus::Synced,
                },
                "Purchase completed: annual",
            ),
            (
                PaywallResult::Purchased {
                    product_id: "annual".into(),
                    sync_status: PaywallSyncStatus::SyncFailed,
                },
                "Purchase completed, but sync failed: annual",
            ),
            (
                PaywallResult::Restored {
                    count: 2,
                    sync_status: PaywallSyncStatus::Synced,
                },
                "Restored 2 purchase(s)",
            ),
            (
                PaywallResult::Restored {
                    count: 1,
                    sync_status: PaywallSyncStatus::SyncFailed,
                },
                "Restored 1 purchase(s), but sync failed",
            ),
            (PaywallResult::Cancelled, "Purchase cancelled"),
            (PaywallResult::Pending, "Purchase is pending"),
            (
                PaywallResult::Failed {
                    message: "No purchases found".into(),
                },
                "No purchases found",
            ),
        ];

        for (result, expected) in cases {
            assert_eq!(user_message(&result), expected);
        }
    }

    #[tokio::test]
    async fn test_load_produces_success_model() {
        let mut store = store_with(FakeBillingStore::default(), FakeBillingSync::default());
        assert_eq!(store.state(), &UiState::Idle);

        let state = store.load().await;
        let model = model(state);
        assert_eq!(model.products.len(), 3);
        assert!(!model.is_processing);
        assert_eq!(model.last_result, None);
        assert_eq!(model.result_message, None);
    }

    #[tokio::test]
    async fn test_purchase_dismisses_sheet() {
        let fake = FakeBillingStore {
            purchase_outcome: StorePurchaseOutcome::Success {
                purchase: purchase_of("monthly"),
            },
            ..Default::default()
        };
        let sync = FakeBillingSync::with_results(vec![BillingSyncResult::Failure { code: Some(502) }]);
        let mut store = store_with(fake, sync);
        let mut events = store.subscribe();

        let state = store.purchase("monthly").await;
        assert_eq!(
            model(state).result_message.as_deref(),
            Some("Purchase completed, but sync failed: monthly")
        );
        assert_eq!(
            events.try_recv().unwrap(),
            PaywallEvent::DismissSheet(PAYWALL_SHEET_ID.to_string())
        );
    }

    #[tokio::test]
    async fn test_cancelled_purchase_shows_snackbar() {
        let mut store = store_with(FakeBillingStore::default(), FakeBillingSync::default());
        let mut events = store.subscribe();

        store.purchase("annual").await;
        assert_eq!(
            events.try_recv().unwrap(),
            PaywallEvent::ShowSnackbar("Purchase cancelled".to_string())
        );
    }

    #[tokio::test]
    async fn test_empty_restore_shows_snackbar() {
        let mut store = store_with(FakeBillingStore::default(), FakeBillingSync::default());
        let mut events = store.subscribe();

        store.restore_purchases().await;
        assert_eq!(
            events.try_recv().unwrap(),
            PaywallEvent::ShowSnackbar("No purchases found".to_string())
        );
    }

    #[tokio::test]
    async fn test_load_emits_no_event() {
        let mut store = store_with(FakeBillingStore::default(), FakeBillingSync::default());
        let mut events = store.subscribe();

        store.load().await;
        assert!(events.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_events_without_subscribers_are_dropped() {
        let mut store = store_with(FakeBillingStore::default(), FakeBillingSync::default());
        let state = store.restore_purchases().await;
        assert_eq!(
            model(state).result_message.as_deref(),
            Some("No purchases found")
        );
    }

    #[test]
    fn test_ui_state_serialization() {
        let json = serde_json::to_value(UiState::<PaywallUiModel>::Error("boom".into())).unwrap();
        assert_eq!(json["state"], "error");
        assert_eq!(json["data"], "boom");
    }
}
