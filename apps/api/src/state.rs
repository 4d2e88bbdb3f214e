use std::sync::Arc;

use crate::analysis::classifier::ErrorClassifier;
use crate::config::Config;
use crate::llm_client::GenerativeProvider;
use crate::payments::CheckoutProvider;

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Provider clients are built once in `main` and passed in here, never held
/// in globals, so tests can swap them for fakes.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Generative backend. Default: `GeminiClient`.
    pub llm: Arc<dyn GenerativeProvider>,
    /// `None` when no payment secret key is configured.
    pub payments: Option<Arc<dyn CheckoutProvider>>,
    pub classifier: Arc<ErrorClassifier>,
}
