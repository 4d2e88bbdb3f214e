mod analysis;
mod config;
mod errors;
mod llm_client;
mod models;
mod payments;
mod routes;
mod state;
mod upload;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::classifier::ErrorClassifier;
use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing GOOGLE_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{crate_name}={level},tower_http={level}",
                crate_name = env!("CARGO_PKG_NAME"),
                level = &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ResumeHub API v{}", env!("CARGO_PKG_VERSION"));
    if config.debug {
        info!("Debug mode enabled");
    }

    // Scratch space for in-flight uploads
    tokio::fs::create_dir_all(&config.upload_dir)
        .await
        .with_context(|| format!("Failed to create upload dir {:?}", config.upload_dir))?;
    info!("Upload scratch dir: {:?}", config.upload_dir);

    // Initialize Gemini client
    let llm = Arc::new(GeminiClient::new(config.google_api_key.clone()));
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    // Initialize payments (optional)
    let payments = payments::create_provider(&config.stripe);
    if payments.is_some() {
        info!("Stripe checkout enabled");
    } else {
        warn!("STRIPE_SECRET_KEY not set; checkout will report 'Payment not configured'");
    }

    // Build app state
    let state = AppState {
        config: config.clone(),
        llm,
        payments,
        classifier: Arc::new(ErrorClassifier::default()),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
