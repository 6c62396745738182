//! Fixed backend endpoints and catalog identifiers.
//!
//! These values are shared with the server and must not drift.

/// Auth backend endpoints.
pub struct AuthContract;

impl AuthContract {
    pub const OTP_ENDPOINT: &'static str = "/auth/v1/otp";
    pub const VERIFY_ENDPOINT: &'static str = "/auth/v1/verify";
    pub const LOGOUT_ENDPOINT: &'static str = "/auth/v1/logout";
    /// Opened in the browser, never POSTed.
    pub const AUTHORIZE_ENDPOINT: &'static str = "/auth/v1/authorize";
}

/// Billing backend endpoints and catalog.
pub struct BillingContract;

impl BillingContract {
    /// Catalog ids in canonical display order.
    pub const PRODUCT_IDS: [&'static str; 4] = ["monthly", "annual", "remove_ads", "lifetime"];

    pub const ENTITLEMENTS_ENDPOINT: &'static str = "/api/v1/billing/entitlements/me";
    pub const PURCHASES_ENDPOINT: &'static str = "/api/v1/billing/purchases/me?limit=50";
    pub const SYNC_ENDPOINT: &'static str = "/api/v1/billing/purchases/sync";

    /// Top-level keys of the sync request body, in wire order.
    pub const SYNC_PAYLOAD_FIELDS: [&'static str; 10] = [
        "platform",
        "storeProductId",
        "storeTransactionId",
        "externalOrderId",
        "status",
        "purchasedAt",
        "expiresAt",
        "canceledAt",
        "refundedAt",
        "raw",
    ];

    /// Position of `product_id` in the canonical catalog, `None` if unknown.
    pub fn catalog_rank(product_id: &str) -> Option<usize> {
        Self::PRODUCT_IDS.iter().position(|id| *id == product_id)
    }

    /// Catalog ids as owned strings, ready for a store query.
    pub fn product_ids() -> Vec<String> {
        Self::PRODUCT_IDS.iter().map(|id| id.to_string()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_ids_are_fixed() {
        assert_eq!(
            BillingContract::PRODUCT_IDS,
            ["monthly", "annual", "remove_ads", "lifetime"]
        );
    }

    #[test]
    fn test_sync_payload_fields_are_fixed() {
        assert_eq!(BillingContract::SYNC_PAYLOAD_FIELDS.first(), Some(&"platform"));
        assert_eq!(BillingContract::SYNC_PAYLOAD_FIELDS.last(), Some(&"raw"));
        assert_eq!(BillingContract::SYNC_PAYLOAD_FIELDS.len(), 10);
    }

    #[test]
    fn test_endpoints_are_fixed() {
        assert_eq!(AuthContract::OTP_ENDPOINT, "/auth/v1/otp");
        assert_eq!(AuthContract::VERIFY_ENDPOINT, "/auth/v1/verify");
        assert_eq!(AuthContract::LOGOUT_ENDPOINT, "/auth/v1/logout");
        assert_eq!(AuthContract::AUTHORIZE_ENDPOINT, "/auth/v1/authorize");
        assert_eq!(
            BillingContract::ENTITLEMENTS_ENDPOINT,
            "/api/v1/billing/entitlements/me"
        );
        assert_eq!(
            BillingContract::PURCHASES_ENDPOINT,
            "/api/v1/billing/purchases/me?limit=50"
        );
        assert_eq!(BillingContract::SYNC_ENDPOINT, "/api/v1/billing/purchases/sync");
    }

    #[test]
    fn test_catalog_rank() {
        assert_eq!(BillingContract::catalog_rank("monthly"), Some(0));
        assert_eq!(BillingContract::catalog_rank("lifetime"), Some(3));
        assert_eq!(BillingContract::catalog_rank("weekly"), None);
    }
}
