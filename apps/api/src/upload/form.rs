//! Multipart intake for the document endpoints.
//!
//! The form is buffered in memory before validation. The file part is read
//! chunk by chunk and reading stops once it passes the upload ceiling, so an
//! oversized file costs at most `MAX_UPLOAD_BYTES` of memory.

use axum::extract::multipart::{Field, MultipartError};
use axum::extract::Multipart;
use axum::http::StatusCode;
use bytes::{Bytes, BytesMut};
use tracing::debug;

use crate::errors::AppError;
use crate::upload::MAX_UPLOAD_BYTES;

const FILE_FIELD: &str = "file";
const FEEDBACK_FIELD: &str = "feedback";

/// The `file` part of a form, not yet validated.
#[derive(Debug)]
pub struct FilePart {
    /// Empty when the client sent no filename.
    pub filename: String,
    pub bytes: Bytes,
    /// Set when reading stopped at the upload ceiling.
    pub truncated: bool,
}

#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<FilePart>,
    pub feedback: Option<String>,
}

/// Reads the `file` and `feedback` fields. Other fields are skipped, and only
/// the first occurrence of each known field is kept.
pub async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart.next_field().await.map_err(invalid_payload)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some(FILE_FIELD) if form.file.is_none() => {
                let part = read_file_part(field).await?;
                let truncated = part.truncated;
                form.file = Some(part);
                if truncated {
                    // The rest of the body is not worth reading.
                    break;
                }
            }
            Some(FEEDBACK_FIELD) if form.feedback.is_none() => {
                form.feedback = Some(field.text().await.map_err(invalid_payload)?);
            }
            other => debug!("Skipping multipart field {:?}", other),
        }
    }

    Ok(form)
}

async fn read_file_part(mut field: Field<'_>) -> Result<FilePart, AppError> {
    let filename = field.file_name().unwrap_or_default().to_string();
    let mut buf = BytesMut::new();
    let mut truncated = false;

    loop {
        match field.chunk().await {
            Ok(Some(chunk)) => {
                if buf.len() + chunk.len() > MAX_UPLOAD_BYTES {
                    truncated = true;
                    break;
                }
                buf.extend_from_slice(&chunk);
            }
            Ok(None) => break,
            Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
                truncated = true;
                break;
            }
            Err(e) => return Err(invalid_payload(e)),
        }
    }

    Ok(FilePart {
        filename,
        bytes: buf.freeze(),
        truncated,
    })
}

fn invalid_payload(e: MultipartError) -> AppError {
    debug!("Rejecting malformed multipart body: {e}");
    AppError::Validation("Invalid multipart payload".to_string())
}
