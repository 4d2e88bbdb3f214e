/// LLM Client: the single point of entry for all Gemini API calls in ResumeHub.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// All model interactions MUST go through a `GenerativeProvider`.
///
/// Model: gemini-2.0-flash (hardcoded; do not make configurable)
use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::debug;

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com";
/// The model used for all generation calls in ResumeHub.
pub const MODEL: &str = "gemini-2.0-flash";
const HTTP_TIMEOUT: Duration = Duration::from_secs(120);

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Could not read upload from disk: {0}")]
    Io(#[from] std::io::Error),

    #[error("Upload session was not granted an upload URL")]
    MissingUploadUrl,

    #[error("Model returned no text (finish reason: {reason})")]
    EmptyContent { reason: String },
}

impl From<reqwest::Error> for LlmError {
    // Request URLs are stripped so error text stays free of endpoint paths.
    fn from(e: reqwest::Error) -> Self {
        LlmError::Http(e.without_url())
    }
}

/// A file stored on the provider side, referenced by generation calls.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RemoteFile {
    pub name: String,
    pub uri: String,
    pub mime_type: String,
}

/// A generative-AI backend able to take a document and a prompt.
///
/// Carried in `AppState` as `Arc<dyn GenerativeProvider>` so handlers can be
/// exercised against fakes.
#[async_trait]
pub trait GenerativeProvider: Send + Sync {
    /// Uploads the file at `path` and returns the provider-side handle.
    async fn upload_file(
        &self,
        path: &Path,
        mime_type: &str,
        display_name: &str,
    ) -> Result<RemoteFile, LlmError>;

    /// Runs one generation call over `file` and returns the model's text.
    async fn generate(&self, file: &RemoteFile, prompt: &str) -> Result<String, LlmError>;
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    file: RemoteFile,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum Part<'a> {
    File { file_data: FileData<'a> },
    Text { text: &'a str },
}

#[derive(Debug, Serialize)]
struct FileData<'a> {
    mime_type: &'a str,
    file_uri: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    content: Option<CandidateContent>,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UsageMetadata {
    #[serde(default)]
    prompt_token_count: u32,
    #[serde(default)]
    candidates_token_count: u32,
}

impl GenerateResponse {
    /// Concatenates the text parts of the first candidate.
    fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let text: String = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if text.trim().is_empty() {
            None
        } else {
            Some(text)
        }
    }

    fn finish_reason(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.finish_reason.clone())
            .unwrap_or_else(|| "none".to_string())
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
    status: Option<String>,
}

/// Renders a Gemini error body as `"<STATUS>: <message>"`, falling back to
/// the raw body when it is not the documented shape.
fn api_error_message(body: &str) -> String {
    match serde_json::from_str::<GeminiError>(body) {
        Ok(GeminiError {
            error: GeminiErrorBody {
                message,
                status: Some(status),
            },
        }) => format!("{status}: {message}"),
        Ok(e) => e.error.message,
        Err(_) => body.to_string(),
    }
}

/// Gemini REST client: resumable File API upload plus `generateContent`.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(HTTP_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            api_key,
        }
    }

    async fn check(response: reqwest::Response) -> Result<reqwest::Response, LlmError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(LlmError::Api {
            status: status.as_u16(),
            message: api_error_message(&body),
        })
    }
}

#[async_trait]
impl GenerativeProvider for GeminiClient {
    async fn upload_file(
        &self,
        path: &Path,
        mime_type: &str,
        display_name: &str,
    ) -> Result<RemoteFile, LlmError> {
        let bytes = tokio::fs::read(path).await?;

        let start = self
            .client
            .post(format!("{GEMINI_API_BASE}/upload/v1beta/files"))
            .header("x-goog-api-key", &self.api_key)
            .header("X-Goog-Upload-Protocol", "resumable")
            .header("X-Goog-Upload-Command", "start")
            .header(
                "X-Goog-Upload-Header-Content-Length",
                bytes.len().to_string(),
            )
            .header("X-Goog-Upload-Header-Content-Type", mime_type)
            .json(&json!({ "file": { "display_name": display_name } }))
            .send()
            .await?;
        let start = Self::check(start).await?;

        let upload_url = start
            .headers()
            .get("x-goog-upload-url")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or(LlmError::MissingUploadUrl)?;

        let size = bytes.len();
        let finished = self
            .client
            .post(upload_url)
            .header("X-Goog-Upload-Offset", "0")
            .header("X-Goog-Upload-Command", "upload, finalize")
            .body(bytes)
            .send()
            .await?;
        let uploaded: UploadResponse = Self::check(finished).await?.json().await?;

        debug!(
            "Uploaded {} bytes as {} ({})",
            size, uploaded.file.name, uploaded.file.mime_type
        );
        Ok(uploaded.file)
    }

    async fn generate(&self, file: &RemoteFile, prompt: &str) -> Result<String, LlmError> {
        let request_body = GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::File {
                        file_data: FileData {
                            mime_type: &file.mime_type,
                            file_uri: &file.uri,
                        },
                    },
                    Part::Text { text: prompt },
                ],
            }],
        };

        let response = self
            .client
            .post(format!(
                "{GEMINI_API_BASE}/v1beta/models/{MODEL}:generateContent"
            ))
            .header("x-goog-api-key", &self.api_key)
            .json(&request_body)
            .send()
            .await?;
        let generated: GenerateResponse = Self::check(response).await?.json().await?;

        if let Some(usage) = &generated.usage_metadata {
            debug!(
                "Generation succeeded: prompt_tokens={}, output_tokens={}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        generated.text().ok_or_else(|| LlmError::EmptyContent {
            reason: generated.finish_reason(),
        })
    }
}
