//! Axum route handlers for the document endpoints.
//!
//! Per request: RECEIVED → VALIDATED → UPLOADED_TO_PROVIDER → GENERATED →
//! RESPONDED, with REJECTED after a failed gate check and FAILED after a
//! provider error. Each transition is logged under a span with a request id.

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Json,
};
use tracing::{info, info_span, Instrument};
use uuid::Uuid;

use crate::analysis::delegate::{run_document_task, DocumentTask};
use crate::analysis::translator::translate;
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;
use crate::state::AppState;
use crate::upload::form::read_upload_form;
use crate::upload::gate::{require_feedback, validate_upload, ValidatedUpload, NO_FILE_PROVIDED};

/// POST /upload-resume
///
/// Multipart field `file`. Responds with the model's feedback on the document.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let span = info_span!("upload_resume", request_id = %Uuid::new_v4());
    async move {
        info!("Received");
        let upload = gate(multipart, false).await?.0;
        process_document(&state, upload, DocumentTask::Analyze).await
    }
    .instrument(span)
    .await
}

/// POST /generate-improved-resume
///
/// Multipart fields `file` and `feedback`. Responds with a rewritten document.
pub async fn handle_generate_improved_resume(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<AnalysisResult>, AppError> {
    let span = info_span!("generate_improved_resume", request_id = %Uuid::new_v4());
    async move {
        info!("Received");
        let (upload, feedback) = gate(multipart, true).await?;
        let feedback = feedback.unwrap_or_default();
        process_document(&state, upload, DocumentTask::Improve { feedback }).await
    }
    .instrument(span)
    .await
}

/// Reads and validates the form. `feedback` is only checked when required.
async fn gate(
    multipart: Result<Multipart, MultipartRejection>,
    needs_feedback: bool,
) -> Result<(ValidatedUpload, Option<String>), AppError> {
    let result: Result<_, AppError> = async move {
        // A request that is not multipart at all carries no file.
        let multipart =
            multipart.map_err(|_| AppError::Validation(NO_FILE_PROVIDED.to_string()))?;
        let form = read_upload_form(multipart).await?;
        let upload = validate_upload(form.file)?;
        let feedback = if needs_feedback {
            Some(require_feedback(form.feedback)?)
        } else {
            None
        };
        Ok((upload, feedback))
    }
    .await;

    if let Err(e) = &result {
        info!("Rejected: {e}");
    }
    result
}

async fn process_document(
    state: &AppState,
    upload: ValidatedUpload,
    task: DocumentTask,
) -> Result<Json<AnalysisResult>, AppError> {
    info!(
        filename = %upload.filename,
        original = %upload.original_name,
        bytes = upload.size(),
        task = task.label(),
        "Validated"
    );

    let outcome = run_document_task(
        state.llm.as_ref(),
        &state.config.upload_dir,
        state.config.provider_timeout,
        &upload,
        &task,
    )
    .await;

    let result = translate(outcome, &task, &upload.filename, &state.classifier)?;
    info!("Responded");
    Ok(Json(result))
}
