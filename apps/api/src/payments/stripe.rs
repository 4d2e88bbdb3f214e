//! Stripe payment provider implementation

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use crate::payments::{CheckoutProvider, CheckoutSession, PaymentError, Result};

const STRIPE_CHECKOUT_URL: &str = "https://api.stripe.com/v1/checkout/sessions";

#[derive(Debug, Deserialize)]
struct StripeSession {
    id: String,
    url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct StripeError {
    error: StripeErrorBody,
}

#[derive(Debug, Deserialize)]
struct StripeErrorBody {
    message: Option<String>,
}

/// Stripe payment provider
pub struct StripeProvider {
    client: Client,
    api_key: String,
}

impl StripeProvider {
    /// Create a new Stripe provider
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }
}

/// Form parameters for a hosted, subscription-mode session with one line item.
fn checkout_params<'a>(
    price_id: &'a str,
    success_url: &'a str,
    cancel_url: &'a str,
) -> [(&'static str, &'a str); 5] {
    [
        ("mode", "subscription"),
        ("line_items[0][price]", price_id),
        ("line_items[0][quantity]", "1"),
        ("success_url", success_url),
        ("cancel_url", cancel_url),
    ]
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<StripeError>(body)
        .ok()
        .and_then(|e| e.error.message)
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl CheckoutProvider for StripeProvider {
    async fn create_checkout_session(
        &self,
        price_id: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession> {
        let response = self
            .client
            .post(STRIPE_CHECKOUT_URL)
            .bearer_auth(&self.api_key)
            .form(&checkout_params(price_id, success_url, cancel_url))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::error!("Failed to create Stripe checkout session ({status}): {body}");
            return Err(PaymentError::ProviderApi(api_error_message(&body)));
        }

        let session: StripeSession = response.json().await?;
        tracing::info!("Created checkout session {}", session.id);

        let url = session.url.ok_or_else(|| {
            tracing::error!("Checkout session missing URL");
            PaymentError::ProviderApi("Checkout session missing URL".to_string())
        })?;

        Ok(CheckoutSession {
            id: session.id,
            url,
        })
    }
}
