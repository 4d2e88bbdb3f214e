//! Upload validation. Every check runs on in-memory data; a rejected upload
//! never reaches the filesystem.

use bytes::Bytes;

use crate::errors::AppError;
use crate::upload::form::FilePart;
use crate::upload::MAX_UPLOAD_BYTES;

pub const NO_FILE_PROVIDED: &str = "No file provided";
pub const NO_FILE_SELECTED: &str = "No file selected";
pub const FILE_TYPE_NOT_ALLOWED: &str = "File type not allowed";
pub const NO_FEEDBACK_PROVIDED: &str = "No feedback provided";

/// Document formats accepted by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    Pdf,
    Doc,
    Docx,
    Txt,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Pdf,
        DocumentKind::Doc,
        DocumentKind::Docx,
        DocumentKind::Txt,
    ];

    pub fn extension(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "pdf",
            DocumentKind::Doc => "doc",
            DocumentKind::Docx => "docx",
            DocumentKind::Txt => "txt",
        }
    }

    pub fn mime_type(self) -> &'static str {
        match self {
            DocumentKind::Pdf => "application/pdf",
            DocumentKind::Doc => "application/msword",
            DocumentKind::Docx => {
                "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
            }
            DocumentKind::Txt => "text/plain",
        }
    }

    /// Matches the substring after the final `.`, case-insensitively.
    pub fn from_filename(filename: &str) -> Option<Self> {
        let (_, ext) = filename.rsplit_once('.')?;
        let ext = ext.to_ascii_lowercase();
        Self::ALL.into_iter().find(|k| k.extension() == ext)
    }
}

/// Extensions in the order they are advertised to clients.
pub fn supported_extensions() -> Vec<&'static str> {
    DocumentKind::ALL.iter().map(|k| k.extension()).collect()
}

/// An upload that passed every gate check. Lives for one request only.
#[derive(Debug)]
pub struct ValidatedUpload {
    pub original_name: String,
    /// Safe to echo back and log.
    pub filename: String,
    pub kind: DocumentKind,
    pub bytes: Bytes,
}

impl ValidatedUpload {
    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

/// Runs the file checks in order: presence, filename, extension, size.
pub fn validate_upload(file: Option<FilePart>) -> Result<ValidatedUpload, AppError> {
    let file = file.ok_or_else(|| AppError::Validation(NO_FILE_PROVIDED.to_string()))?;

    if file.filename.is_empty() {
        return Err(AppError::Validation(NO_FILE_SELECTED.to_string()));
    }

    let kind = DocumentKind::from_filename(&file.filename)
        .ok_or_else(|| AppError::Validation(FILE_TYPE_NOT_ALLOWED.to_string()))?;

    if file.truncated || file.bytes.len() > MAX_UPLOAD_BYTES {
        return Err(AppError::Validation(format!(
            "File too large. Maximum size is {} MB",
            MAX_UPLOAD_BYTES / (1024 * 1024)
        )));
    }

    Ok(ValidatedUpload {
        filename: sanitize_filename(&file.filename, kind),
        original_name: file.filename,
        kind,
        bytes: file.bytes,
    })
}

/// Requires a non-blank feedback field and returns it trimmed.
pub fn require_feedback(feedback: Option<String>) -> Result<String, AppError> {
    feedback
        .map(|f| f.trim().to_string())
        .filter(|f| !f.is_empty())
        .ok_or_else(|| AppError::Validation(NO_FEEDBACK_PROVIDED.to_string()))
}

/// Reduces an untrusted filename to its basename made of ASCII alphanumerics,
/// `.`, `-` and `_`. Falls back to `upload.<ext>` when too little survives.
pub fn sanitize_filename(raw: &str, kind: DocumentKind) -> String {
    let basename = raw.rsplit(['/', '\\']).next().unwrap_or_default();

    let cleaned: String = basename
        .chars()
        .filter_map(|c| match c {
            c if c.is_whitespace() => Some('_'),
            c if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') => Some(c),
            _ => None,
        })
        .collect();
    let cleaned = cleaned.trim_start_matches(['.', '_']);

    let has_stem = cleaned.len() > kind.extension().len() + 1;
    if has_stem && DocumentKind::from_filename(cleaned) == Some(kind) {
        cleaned.to_string()
    } else {
        format!("upload.{}", kind.extension())
    }
}
