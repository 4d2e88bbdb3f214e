use axum::Json;
use serde_json::{json, Value};

use crate::upload::gate::supported_extensions;
use crate::upload::MAX_UPLOAD_BYTES;

const MAX_UPLOAD_MB: usize = MAX_UPLOAD_BYTES / (1024 * 1024);

/// GET /health
/// Liveness only; never touches the AI provider.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "message": "ResumeHub backend is running",
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// GET /supported-formats
pub async fn supported_formats_handler() -> Json<Value> {
    Json(json!({
        "formats": supported_extensions(),
        "max_size_mb": MAX_UPLOAD_MB,
    }))
}

/// GET /api and GET /
pub async fn api_index_handler() -> Json<Value> {
    Json(json!({
        "message": "Welcome to ResumeHub API",
        "description": "AI-powered resume analysis using Google Gemini",
        "endpoints": {
            "POST /upload-resume": "Upload and analyze a resume",
            "POST /generate-improved-resume": "Rewrite a resume from feedback",
            "POST /create-checkout-session": "Start a hosted payment checkout",
            "GET /health": "Check server health",
            "GET /supported-formats": "Get supported file formats",
        },
        "supported_formats": supported_extensions(),
        "max_file_size_mb": MAX_UPLOAD_MB,
    }))
}
