//! Catalog and purchase records.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BillingProductType {
    Subscription,
    OneTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingProduct {
    pub id: String,
    #[serde(rename = "type")]
    pub product_type: BillingProductType,
}

impl BillingProduct {
    pub fn new(id: impl Into<String>, product_type: BillingProductType) -> Self {
        Self {
            id: id.into(),
            product_type,
        }
    }
}

/// Store-side state of a purchase. Serialized under the store's enum names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorePurchaseState {
    Purchased,
    Pending,
    UserCanceled,
    Failed,
    Refunded,
    Expired,
}

impl StorePurchaseState {
    pub const ALL: [StorePurchaseState; 6] = [
        StorePurchaseState::Purchased,
        StorePurchaseState::Pending,
        StorePurchaseState::UserCanceled,
        StorePurchaseState::Failed,
        StorePurchaseState::Refunded,
        StorePurchaseState::Expired,
    ];

    /// Ledger status sent to the billing backend.
    pub fn sync_status(&self) -> &'static str {
        match self {
            StorePurchaseState::Purchased => "active",
            StorePurchaseState::Pending => "pending",
            StorePurchaseState::UserCanceled => "canceled",
            StorePurchaseState::Failed => "failed",
            StorePurchaseState::Refunded => "refunded",
            StorePurchaseState::Expired => "expired",
        }
    }

    /// Store enum name, as carried in the raw sync object.
    pub fn name(&self) -> &'static str {
        match self {
            StorePurchaseState::Purchased => "PURCHASED",
            StorePurchaseState::Pending => "PENDING",
            StorePurchaseState::UserCanceled => "USER_CANCELED",
            StorePurchaseState::Failed => "FAILED",
            StorePurchaseState::Refunded => "REFUNDED",
            StorePurchaseState::Expired => "EXPIRED",
        }
    }
}

/// A purchase as reported by the store. Timestamps are the store's own
/// strings and pass through untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StorePurchase {
    pub product_id: String,
    pub purchase_token: String,
    pub order_id: Option<String>,
    pub purchase_state: StorePurchaseState,
    #[serde(default)]
    pub purchase_time: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    #[serde(default)]
    pub canceled_at: Option<String>,
    #[serde(default)]
    pub refunded_at: Option<String>,
    #[serde(default)]
    pub package_name: Option<String>,
    #[serde(default)]
    pub acknowledged: bool,
    #[serde(default)]
    pub auto_renewing: bool,
    #[serde(default)]
    pub original_json: Option<String>,
    #[serde(default)]
    pub signature: Option<String>,
}

impl StorePurchase {
    /// Minimal record; every optional field empty.
    pub fn new(
        product_id: impl Into<String>,
        purchase_token: impl Into<String>,
        order_id: Option<String>,
        purchase_state: StorePurchaseState,
    ) -> Self {
        Self {
            product_id: product_id.into(),
            purchase_token: purchase_token.into(),
            order_id,
            purchase_state,
            purchase_time: None,
            expires_at: None,
            canceled_at: None,
            refunded_at: None,
            package_name: None,
            acknowledged: false,
            auto_renewing: false,
            original_json: None,
            signature: None,
        }
    }
}

/// Result of asking the store to buy something.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorePurchaseOutcome {
    Success { purchase: StorePurchase },
    Cancelled,
    Pending,
    Failed { message: String },
}

/// Result of reconciling one purchase with the backend ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum BillingSyncResult {
    /// Sync disabled; no call made. Callers treat this as success.
    Skipped,
    Success,
    /// Non-2xx status, or `None` when no response arrived.
    Failure { code: Option<u16> },
}

impl BillingSyncResult {
    pub fn is_failure(&self) -> bool {
        matches!(self, BillingSyncResult::Failure { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sync_status_mapping_is_exhaustive() {
        let mapped: Vec<&str> = StorePurchaseState::ALL
            .iter()
            .map(StorePurchaseState::sync_status)
            .collect();
        assert_eq!(
            mapped,
            vec!["active", "pending", "canceled", "failed", "refunded", "expired"]
        );
    }

    #[test]
    fn test_state_name_matches_serde() {
        for state in StorePurchaseState::ALL {
            assert_eq!(
                serde_json::to_value(state).unwrap(),
                serde_json::Value::String(state.name().to_string())
            );
        }
    }

    #[test]
    fn test_purchase_deserializes_with_defaults() {
        let purchase: StorePurchase = serde_json::from_str(
            r#"{"product_id":"monthly","purchase_token":"t","order_id":null,"purchase_state":"USER_CANCELED"}"#,
        )
        .unwrap();
        assert_eq!(purchase.purchase_state, StorePurchaseState::UserCanceled);
        assert!(!purchase.acknowledged);
        assert_eq!(purchase.package_name, None);
    }

    #[test]
    fn test_sync_failure_shape() {
        assert!(BillingSyncResult::Failure { code: Some(500) }.is_failure());
        assert!(!BillingSyncResult::Skipped.is_failure());
        let json = serde_json::to_value(BillingSyncResult::Failure { code: None }).unwrap();
        assert_eq!(json["result"], "failure");
        assert!(json["code"].is_null());
    }
}
