use axum::{body::Bytes, extract::State, Json};
use serde::Deserialize;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::payments::{CheckoutSession, Plan};
use crate::state::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub plan: Plan,
}

/// Success and cancel redirect targets under the public base URL.
/// Stripe substitutes `{CHECKOUT_SESSION_ID}` itself.
fn redirect_urls(base_url: &str) -> (String, String) {
    let base = base_url.trim_end_matches('/');
    (
        format!("{base}/?checkout=success&session_id={{CHECKOUT_SESSION_ID}}"),
        format!("{base}/?checkout=cancelled"),
    )
}

/// An empty body selects the default plan.
fn parse_request(body: &[u8]) -> Result<CheckoutRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(CheckoutRequest::default());
    }
    serde_json::from_slice(body)
        .map_err(|e| AppError::Validation(format!("Invalid checkout request: {e}")))
}

/// POST /create-checkout-session
///
/// Optional JSON body `{"plan": "monthly" | "annual"}`; defaults to monthly.
pub async fn handle_create_checkout_session(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<CheckoutSession>, AppError> {
    let Some(provider) = state.payments.as_ref() else {
        warn!("Checkout requested but no payment secret key is configured");
        return Err(AppError::PaymentNotConfigured);
    };

    let plan = parse_request(&body)?.plan;
    let Some(price_id) = plan.price_id(&state.config.stripe) else {
        warn!(?plan, "Checkout requested but the plan has no price id");
        return Err(AppError::PaymentNotConfigured);
    };

    let (success_url, cancel_url) = redirect_urls(&state.config.public_base_url);
    let session = provider
        .create_checkout_session(price_id, &success_url, &cancel_url)
        .await
        .map_err(|e| AppError::Payment(e.to_string()))?;

    info!(session_id = %session.id, ?plan, "Checkout session created");
    Ok(Json(session))
}
