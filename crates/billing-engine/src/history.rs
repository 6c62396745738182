//! Purchase history filtering and the subscription cancel reducer.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseCategory {
    Subscription,
    OneTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseFilter {
    #[default]
    All,
    Subscriptions,
    OneTime,
}

impl PurchaseFilter {
    pub fn matches(&self, category: PurchaseCategory) -> bool {
        match self {
            PurchaseFilter::All => true,
            PurchaseFilter::Subscriptions => category == PurchaseCategory::Subscription,
            PurchaseFilter::OneTime => category == PurchaseCategory::OneTime,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseRecord {
    pub id: String,
    pub product_id: String,
    pub category: PurchaseCategory,
    pub purchased_at: String,
}

/// Records matching `filter`, in their original order.
pub fn filter_purchases(records: &[PurchaseRecord], filter: PurchaseFilter) -> Vec<PurchaseRecord> {
    records
        .iter()
        .filter(|record| filter.matches(record.category))
        .cloned()
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubscriptionState {
    pub is_subscribed: bool,
    pub plan_name: String,
    pub renewal_date: Option<String>,
    #[serde(default)]
    pub is_cancelling: bool,
}

impl SubscriptionState {
    pub fn free() -> Self {
        Self {
            is_subscribed: false,
            plan_name: "Free".to_string(),
            renewal_date: None,
            is_cancelling: false,
        }
    }

    pub fn premium(plan_name: impl Into<String>, renewal_date: impl Into<String>) -> Self {
        Self {
            is_subscribed: true,
            plan_name: plan_name.into(),
            renewal_date: Some(renewal_date.into()),
            is_cancelling: false,
        }
    }
}

pub struct SubscriptionReducer {
    state: SubscriptionState,
}

impl SubscriptionReducer {
    pub fn new(state: SubscriptionState) -> Self {
        Self { state }
    }

    /// Marks an active subscription as cancelling. No-op when free or already cancelling.
    pub fn on_cancel_requested(self) -> SubscriptionState {
        if !self.state.is_subscribed || self.state.is_cancelling {
            return self.state;
        }
        SubscriptionState {
            is_cancelling: true,
            ..self.state
        }
    }

    pub fn on_cancel_completed(self) -> SubscriptionState {
        SubscriptionState::free()
    }
}
