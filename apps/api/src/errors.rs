use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::analysis::classifier::ProviderErrorKind;

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
///
/// The HTTP status is the failure discriminant: 4xx for caller mistakes,
/// 5xx for server or upstream failures. Every body carries an `error` string.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A generative-AI call failed. `message` is already user-facing.
    #[error("Provider error ({kind:?}) for {filename}: {message}")]
    Provider {
        filename: String,
        kind: ProviderErrorKind,
        message: String,
    },

    #[error("Payment not configured")]
    PaymentNotConfigured,

    #[error("Payment provider error: {0}")]
    Payment(String),

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::Provider {
                filename,
                kind,
                message,
            } => (
                StatusCode::BAD_GATEWAY,
                json!({
                    "success": false,
                    "filename": filename,
                    "error": message,
                    "error_kind": kind,
                }),
            ),
            AppError::PaymentNotConfigured => (
                StatusCode::BAD_REQUEST,
                json!({ "error": "Payment not configured" }),
            ),
            AppError::Payment(msg) => {
                tracing::error!("Payment provider error: {msg}");
                (StatusCode::BAD_GATEWAY, json!({ "error": msg }))
            }
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "An internal server error occurred" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
