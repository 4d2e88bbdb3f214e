use std::io;
use std::path::Path;

use tempfile::TempPath;

use crate::upload::gate::DocumentKind;

/// On-disk copy of an upload, owned by exactly one request.
///
/// The file gets a random name inside the scratch directory, never the
/// caller's filename. It is removed when the guard is closed or dropped,
/// whichever comes first, so every exit path of the owning handler cleans up.
#[derive(Debug)]
pub struct ScratchFile {
    path: TempPath,
}

impl ScratchFile {
    /// Creates a uniquely named file in `dir` holding `bytes`.
    pub async fn write(dir: &Path, kind: DocumentKind, bytes: &[u8]) -> io::Result<Self> {
        let path = tempfile::Builder::new()
            .prefix("upload-")
            .suffix(&format!(".{}", kind.extension()))
            .tempfile_in(dir)?
            .into_temp_path();

        // On a failed write `path` is dropped here, which deletes the file.
        tokio::fs::write(&path, bytes).await?;

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Deletes the file now, reporting failures instead of swallowing them.
    pub fn close(self) -> io::Result<()> {
        self.path.close()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }

    #[tokio::test]
    async fn test_write_then_close_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let scratch = ScratchFile::write(dir.path(), DocumentKind::Txt, b"hello")
            .await
            .unwrap();

        let path = scratch.path().to_path_buf();
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");
        assert!(path.extension().is_some_and(|e| e == "txt"));

        scratch.close().unwrap();
        assert!(!path.exists());
        assert_eq!(entries(dir.path()), 0);
    }

    #[tokio::test]
    async fn test_drop_removes_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = {
            let scratch = ScratchFile::write(dir.path(), DocumentKind::Pdf, b"%PDF-1.4")
                .await
                .unwrap();
            scratch.path().to_path_buf()
        };
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_names_are_unique_per_write() {
        let dir = tempfile::tempdir().unwrap();
        let a = ScratchFile::write(dir.path(), DocumentKind::Pdf, b"a").await.unwrap();
        let b = ScratchFile::write(dir.path(), DocumentKind::Pdf, b"b").await.unwrap();
        assert_ne!(a.path(), b.path());
        assert_eq!(entries(dir.path()), 2);
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        assert!(ScratchFile::write(&missing, DocumentKind::Txt, b"x").await.is_err());
    }
}
