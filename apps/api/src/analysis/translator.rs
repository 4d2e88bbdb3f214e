//! Response Translator: turns a delegate outcome into the response envelope.

use tracing::warn;

use crate::analysis::classifier::ErrorClassifier;
use crate::analysis::delegate::{DelegateError, DocumentTask};
use crate::errors::AppError;
use crate::models::analysis::AnalysisResult;

pub fn translate(
    outcome: Result<String, DelegateError>,
    task: &DocumentTask,
    filename: &str,
    classifier: &ErrorClassifier,
) -> Result<AnalysisResult, AppError> {
    match outcome {
        Ok(text) => Ok(AnalysisResult::for_task(task, filename, text)),
        Err(DelegateError::Scratch(e)) => Err(AppError::Internal(
            anyhow::Error::new(e).context("Failed to stage upload on disk"),
        )),
        Err(e) => {
            let raw = e.to_string();
            let kind = classifier.classify(&raw);
            warn!(?kind, error = %raw, "Provider call failed");
            Err(AppError::Provider {
                filename: filename.to_string(),
                kind,
                message: kind.user_message(task.failure_prefix(), &raw),
            })
        }
    }
}
