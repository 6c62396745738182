//! Authentication commands.

use super::Context;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use auth_engine::{
    auth_callback_channel, AuthRepository, AuthResult, OAuthFlow, OAuthFlowState, OAuthProvider,
    OtpFlow, OtpFlowState,
};
use serde::Serialize;
use std::sync::Arc;

fn describe_oauth(state: &OAuthFlowState) -> String {
    match state {
        OAuthFlowState::Idle => "Not signed in".to_string(),
        OAuthFlowState::LaunchBrowser { url } => {
            format!("Open this URL in a browser to continue:\n  {}", url)
        }
        OAuthFlowState::HandlingCallback => "Completing sign-in...".to_string(),
        OAuthFlowState::Authenticated => "Signed in".to_string(),
        OAuthFlowState::Error { message } => format!("Error: {}", message),
    }
}

fn describe_otp(state: &OtpFlowState) -> String {
    match state {
        OtpFlowState::Idle => "Idle".to_string(),
        OtpFlowState::SendingCode => "Sending code...".to_string(),
        OtpFlowState::SentCode {
            email,
            cooldown_seconds,
        } => format!(
            "Verification code sent to {}. You can resend in {}s",
            email, cooldown_seconds
        ),
        OtpFlowState::VerifyingCode => "Verifying code...".to_string(),
        OtpFlowState::VerifiedSuccess => "Signed in".to_string(),
        OtpFlowState::RateLimited {
            retry_after_seconds,
        } => format!("Too many requests. Retry in {}s", retry_after_seconds),
        OtpFlowState::Error { message } => format!("Error: {}", message),
    }
}

fn describe_result(result: &AuthResult, success: &str) -> String {
    match result {
        AuthResult::Success => success.to_string(),
        AuthResult::RateLimited {
            retry_after_seconds,
        } => format!("Too many requests. Retry in {}s", retry_after_seconds),
        AuthResult::Failure { message } => format!("Error: {}", message),
    }
}

fn auth_repository(ctx: &Context) -> Result<Arc<dyn AuthRepository>> {
    Ok(Arc::new(ctx.auth_repository()?))
}

/// Print the authorize URL for `provider`.
pub async fn oauth_url(ctx: &Context, provider: OAuthProvider, format: &OutputFormat) -> Result<()> {
    let mut flow = OAuthFlow::new(auth_repository(ctx)?);
    let state = flow.start(provider);
    output::print(&state, &describe_oauth(&state), format);
    Ok(())
}

/// Finish an OAuth login from the redirect URI the browser landed on.
pub async fn oauth_callback(ctx: &Context, callback_uri: &str, format: &OutputFormat) -> Result<()> {
    let (bus, receiver) = auth_callback_channel();
    let mut flow = OAuthFlow::new(auth_repository(ctx)?).with_callback_receiver(receiver);

    if !bus.emit(callback_uri) {
        output::print_error("Callback could not be delivered", format);
        return Ok(());
    }

    match flow.next_callback().await {
        Some(state) => output::print(&state, &describe_oauth(&state), format),
        None => output::print_error("No callback received", format),
    }
    Ok(())
}

pub async fn otp_send(ctx: &Context, email: &str, format: &OutputFormat) -> Result<()> {
    let mut flow = OtpFlow::with_cooldown(auth_repository(ctx)?, ctx.config.otp_cooldown_seconds);
    let state = flow.send_code(email).await;
    output::print(&state, &describe_otp(&state), format);
    Ok(())
}

pub async fn otp_verify(ctx: &Context, email: &str, code: &str, format: &OutputFormat) -> Result<()> {
    let mut flow = OtpFlow::with_cooldown(auth_repository(ctx)?, ctx.config.otp_cooldown_seconds);
    let state = flow.verify_code(email, code).await;
    output::print(&state, &describe_otp(&state), format);
    Ok(())
}

/// Logout and clear session. `local_only` skips the backend call.
pub async fn logout(ctx: &Context, local_only: bool, format: &OutputFormat) -> Result<()> {
    let repository = auth_repository(ctx)?;
    let (result, success) = if local_only {
        (repository.clear_local_session().await, "Local session cleared")
    } else {
        (repository.logout().await, "Logged out successfully")
    };
    output::print(&result, &describe_result(&result, success), format);
    Ok(())
}

#[derive(Serialize)]
struct StatusReport {
    auth_backend: &'static str,
    signed_in: bool,
    billing_sync_enabled: bool,
}

/// Show which backends are in use and whether a session is stored.
pub async fn status(ctx: &Context, format: &OutputFormat) -> Result<()> {
    let report = StatusReport {
        auth_backend: if ctx.auth_repository()?.is_remote() {
            "remote"
        } else {
            "demo"
        },
        signed_in: ctx.session_store.read()?.is_some(),
        billing_sync_enabled: ctx.config.billing_sync_enabled,
    };

    match format {
        OutputFormat::Text => {
            output::print_heading("Template status");
            output::print_row("Auth backend", report.auth_backend);
            output::print_row("Session", if report.signed_in { "stored" } else { "none" });
            output::print_row(
                "Billing sync",
                if report.billing_sync_enabled { "enabled" } else { "disabled" },
            );
        }
        OutputFormat::Json => output::print(&report, "", format),
    }
    Ok(())
}
