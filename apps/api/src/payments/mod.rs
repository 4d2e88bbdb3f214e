//! Payment provider abstraction.
//!
//! `CheckoutProvider` hides which payments API creates hosted checkout
//! sessions. The only implementation talks to Stripe.

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::StripeConfig;

pub mod handlers;
pub mod stripe;

/// Result type for payment provider operations
pub type Result<T> = std::result::Result<T, PaymentError>;

/// Errors that can occur while talking to a payment provider
#[derive(Debug, thiserror::Error)]
pub enum PaymentError {
    #[error("Payment provider API error: {0}")]
    ProviderApi(String),

    #[error("Payment provider unreachable: {0}")]
    Http(#[from] reqwest::Error),
}

/// A hosted checkout session the browser is redirected to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutSession {
    pub id: String,
    pub url: String,
}

/// Subscription plans on offer, each backed by one configured price id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    #[default]
    Monthly,
    Annual,
}

impl Plan {
    pub fn price_id(self, config: &StripeConfig) -> Option<&str> {
        match self {
            Plan::Monthly => config.monthly_price_id.as_deref(),
            Plan::Annual => config.annual_price_id.as_deref(),
        }
    }
}

#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Create a hosted checkout session for one unit of `price_id`.
    async fn create_checkout_session(
        &self,
        price_id: &str,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSession>;
}

/// Create a checkout provider from configuration.
///
/// Returns `None` without a secret key; checkout then reports that payment
/// is not configured.
pub fn create_provider(config: &StripeConfig) -> Option<Arc<dyn CheckoutProvider>> {
    let secret_key = config.secret_key.clone()?;
    Some(Arc::new(stripe::StripeProvider::new(secret_key)))
}
