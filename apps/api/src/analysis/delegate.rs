//! Document Delegate: stages a validated upload on disk, hands it to the
//! generative provider, and removes the scratch copy on every exit path.

use std::path::Path;
use std::time::Duration;

use thiserror::Error;
use tracing::{info, warn};

use crate::analysis::prompts::{improvement_prompt, ANALYSIS_PROMPT};
use crate::llm_client::{GenerativeProvider, LlmError};
use crate::upload::gate::ValidatedUpload;
use crate::upload::scratch::ScratchFile;

/// What the provider is asked to do with the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentTask {
    Analyze,
    Improve { feedback: String },
}

impl DocumentTask {
    pub fn prompt(&self) -> String {
        match self {
            DocumentTask::Analyze => ANALYSIS_PROMPT.to_string(),
            DocumentTask::Improve { feedback } => improvement_prompt(feedback),
        }
    }

    /// Short name used in log spans.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentTask::Analyze => "analyze",
            DocumentTask::Improve { .. } => "improve",
        }
    }

    /// Prefix for failures the classifier does not recognize.
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            DocumentTask::Analyze => "Error analyzing resume with Gemini AI",
            DocumentTask::Improve { .. } => "Error generating improved resume",
        }
    }
}

#[derive(Debug, Error)]
pub enum DelegateError {
    /// Local failure staging the upload. Never reaches the provider.
    #[error("Failed to stage upload on disk: {0}")]
    Scratch(#[source] std::io::Error),

    #[error(transparent)]
    Provider(#[from] LlmError),

    #[error("Provider request timed out after {0:?}")]
    TimedOut(Duration),
}

/// Runs one provider round trip for `upload` under `timeout`.
///
/// The scratch file exists only while the provider call is in flight.
/// It is closed explicitly once the call settles; if this future is dropped
/// mid-call, the guard's destructor removes it instead.
pub async fn run_document_task(
    provider: &dyn GenerativeProvider,
    scratch_dir: &Path,
    timeout: Duration,
    upload: &ValidatedUpload,
    task: &DocumentTask,
) -> Result<String, DelegateError> {
    let scratch = ScratchFile::write(scratch_dir, upload.kind, &upload.bytes)
        .await
        .map_err(DelegateError::Scratch)?;

    let outcome = tokio::time::timeout(
        timeout,
        call_provider(provider, scratch.path(), upload, task),
    )
    .await;

    if let Err(e) = scratch.close() {
        warn!("Failed to remove scratch file: {e}");
    }

    match outcome {
        Ok(result) => result,
        Err(_) => Err(DelegateError::TimedOut(timeout)),
    }
}

async fn call_provider(
    provider: &dyn GenerativeProvider,
    path: &Path,
    upload: &ValidatedUpload,
    task: &DocumentTask,
) -> Result<String, DelegateError> {
    let remote = provider
        .upload_file(path, upload.kind.mime_type(), &upload.filename)
        .await?;
    info!(remote_file = %remote.name, "Uploaded to provider");

    let text = provider.generate(&remote, &task.prompt()).await?;
    info!(chars = text.len(), "Generated");

    Ok(text)
}
