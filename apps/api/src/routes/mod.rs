pub mod assets;
pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers;
use crate::errors::AppError;
use crate::payments::handlers::handle_create_checkout_session;
use crate::state::AppState;
use crate::upload::MAX_REQUEST_BYTES;

async fn not_found() -> AppError {
    AppError::NotFound("Route not found".to_string())
}

pub fn build_router(state: AppState) -> Router {
    let assets = assets::asset_routes(&state.config.static_dir);

    Router::new()
        .route("/", get(health::api_index_handler))
        .route("/api", get(health::api_index_handler))
        .route("/health", get(health::health_handler))
        .route("/supported-formats", get(health::supported_formats_handler))
        // Document endpoints
        .route("/upload-resume", post(handlers::handle_upload_resume))
        .route(
            "/generate-improved-resume",
            post(handlers::handle_generate_improved_resume),
        )
        // Payments
        .route(
            "/create-checkout-session",
            post(handle_create_checkout_session),
        )
        .merge(assets)
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BYTES))
        .with_state(state)
}
