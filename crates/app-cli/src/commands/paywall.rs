//! Paywall commands.

use super::Context;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use billing_engine::{
    create_billing_sync_service, BillingProductType, DemoBillingStore, PaywallEvent, PaywallFlow,
    PaywallStore, PaywallUiModel, UiState,
};
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::debug;

#[derive(Serialize)]
struct PaywallReport<'a> {
    state: &'a UiState<PaywallUiModel>,
    events: Vec<PaywallEvent>,
}

fn paywall_store(ctx: &Context) -> Result<PaywallStore> {
    let sync = create_billing_sync_service(
        &ctx.config.api_base_url,
        ctx.config.billing_sync_enabled,
        ctx.billing_bearer_token(),
    )?;
    let flow = PaywallFlow::new(Arc::new(DemoBillingStore::new()), sync);
    Ok(PaywallStore::new(flow))
}

fn drain_events(receiver: &mut broadcast::Receiver<PaywallEvent>) -> Vec<PaywallEvent> {
    let mut events = Vec::new();
    while let Ok(event) = receiver.try_recv() {
        debug!(?event, "Paywall event");
        events.push(event);
    }
    events
}

fn product_type_label(product_type: BillingProductType) -> &'static str {
    match product_type {
        BillingProductType::Subscription => "subscription",
        BillingProductType::OneTime => "one-time",
    }
}

fn describe(state: &UiState<PaywallUiModel>) -> String {
    match state {
        UiState::Idle => "Idle".to_string(),
        UiState::Loading => "Loading...".to_string(),
        UiState::Success(model) => model
            .result_message
            .clone()
            .unwrap_or_else(|| format!("{} product(s) available", model.products.len())),
        UiState::Error(message) => format!("Error: {}", message),
    }
}

fn print_report(state: &UiState<PaywallUiModel>, events: Vec<PaywallEvent>, format: &OutputFormat) {
    let text = describe(state);
    output::print(&PaywallReport { state, events }, &text, format);
}

/// List the catalog in display order.
pub async fn paywall_products(ctx: &Context, format: &OutputFormat) -> Result<()> {
    let mut store = paywall_store(ctx)?;
    let state = store.load().await;

    match (format, state) {
        (OutputFormat::Text, UiState::Success(model)) => {
            output::print_heading("Products");
            for product in &model.products {
                output::print_row(&product.id, product_type_label(product.product_type));
            }
        }
        _ => print_report(state, Vec::new(), format),
    }
    Ok(())
}

pub async fn paywall_purchase(ctx: &Context, product_id: &str, format: &OutputFormat) -> Result<()> {
    let mut store = paywall_store(ctx)?;
    let mut events = store.subscribe();
    let state = store.purchase(product_id).await;
    print_report(state, drain_events(&mut events), format);
    Ok(())
}

pub async fn paywall_restore(ctx: &Context, format: &OutputFormat) -> Result<()> {
    let mut store = paywall_store(ctx)?;
    let mut events = store.subscribe();
    let state = store.restore_purchases().await;
    print_report(state, drain_events(&mut events), format);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use billing_engine::{BillingProduct, PaywallResult, PaywallSyncStatus};

    #[test]
    fn test_describe_prefers_result_message() {
        let model = PaywallUiModel {
            products: vec![BillingProduct::new("monthly", BillingProductType::Subscription)],
            is_processing: false,
            last_result: Some(PaywallResult::Restored {
                count: 1,
                sync_status: PaywallSyncStatus::Synced,
            }),
            result_message: Some("Restored 1 purchase(s)".to_string()),
        };
        assert_eq!(describe(&UiState::Success(model)), "Restored 1 purchase(s)");
    }

    #[test]
    fn test_describe_catalog_only() {
        let model = PaywallUiModel {
            products: vec![
                BillingProduct::new("monthly", BillingProductType::Subscription),
                BillingProduct::new("lifetime", BillingProductType::OneTime),
            ],
            is_processing: false,
            last_result: None,
            result_message: None,
        };
        assert_eq!(describe(&UiState::Success(model)), "2 product(s) available");
    }

    #[tokio::test]
    async fn test_drain_events_collects_in_order() {
        let (sender, mut receiver) = broadcast::channel(4);
        sender
            .send(PaywallEvent::ShowSnackbar("Purchase is pending".to_string()))
            .unwrap();
        sender
            .send(PaywallEvent::DismissSheet("paywall".to_string()))
            .unwrap();

        let events = drain_events(&mut receiver);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], PaywallEvent::DismissSheet("paywall".to_string()));
    }
}
