use serde::{Deserialize, Serialize};

use crate::analysis::delegate::DocumentTask;

/// Successful outcome of one document request. Returned once, never stored.
///
/// Exactly one of `feedback` / `improved_resume` is set, depending on the task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub success: bool,
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub feedback: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub improved_resume: Option<String>,
}

impl AnalysisResult {
    pub fn for_task(task: &DocumentTask, filename: &str, text: String) -> Self {
        let (feedback, improved_resume) = match task {
            DocumentTask::Analyze => (Some(text), None),
            DocumentTask::Improve { .. } => (None, Some(text)),
        };
        Self {
            success: true,
            filename: filename.to_string(),
            feedback,
            improved_resume,
        }
    }
}
