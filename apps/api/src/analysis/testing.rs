//! Test doubles for the generative provider.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use bytes::Bytes;

use crate::llm_client::{GenerativeProvider, LlmError, RemoteFile};
use crate::upload::form::FilePart;
use crate::upload::gate::{validate_upload, ValidatedUpload};

pub enum Outcome {
    Text(String),
    UploadError(String),
    GenerateError(String),
    /// Never completes; exercises the timeout path.
    Hang,
}

/// What the provider observed during the last call.
#[derive(Debug, Clone, Default)]
pub struct Seen {
    pub path: PathBuf,
    pub existed_during_call: bool,
    pub bytes: Vec<u8>,
    pub mime_type: String,
    pub display_name: String,
    pub prompt: String,
}

pub struct FakeProvider {
    outcome: Outcome,
    seen: Mutex<Seen>,
    calls: AtomicUsize,
}

impl FakeProvider {
    pub fn new(outcome: Outcome) -> Self {
        Self {
            outcome,
            seen: Mutex::new(Seen::default()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn seen(&self) -> Seen {
        self.seen.lock().unwrap().clone()
    }

    /// Number of uploads attempted.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

fn api_error(message: &str) -> LlmError {
    LlmError::Api {
        status: 400,
        message: message.to_string(),
    }
}

#[async_trait]
impl GenerativeProvider for FakeProvider {
    async fn upload_file(
        &self,
        path: &Path,
        mime_type: &str,
        display_name: &str,
    ) -> Result<RemoteFile, LlmError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        {
            let mut seen = self.seen.lock().unwrap();
            seen.path = path.to_path_buf();
            seen.existed_during_call = path.exists();
            seen.bytes = std::fs::read(path).unwrap_or_default();
            seen.mime_type = mime_type.to_string();
            seen.display_name = display_name.to_string();
        }

        match &self.outcome {
            Outcome::UploadError(message) => Err(api_error(message)),
            _ => Ok(RemoteFile {
                name: "files/fake-123".to_string(),
                uri: "https://provider.test/files/fake-123".to_string(),
                mime_type: mime_type.to_string(),
            }),
        }
    }

    async fn generate(&self, _file: &RemoteFile, prompt: &str) -> Result<String, LlmError> {
        self.seen.lock().unwrap().prompt = prompt.to_string();

        match &self.outcome {
            Outcome::Text(text) => Ok(text.clone()),
            Outcome::GenerateError(message) => Err(api_error(message)),
            Outcome::Hang => std::future::pending().await,
            Outcome::UploadError(_) => unreachable!("generate called after failed upload"),
        }
    }
}

/// Builds an upload that already passed the gate.
pub fn upload(filename: &str, bytes: &[u8]) -> ValidatedUpload {
    validate_upload(Some(FilePart {
        filename: filename.to_string(),
        bytes: Bytes::copy_from_slice(bytes),
        truncated: false,
    }))
    .unwrap()
}
