//! Local upload storage.
//!
//! Files are keyed by the client-supplied filename, reduced to its final path
//! component. Same name means overwrite; there is no dedup and no size check.

use std::path::{Path, PathBuf};

use tokio::fs;
use tracing::warn;

use crate::errors::AppError;

/// Reduces a client-supplied filename to a bare file name.
///
/// Directory components are dropped (both `/` and `\` count as separators).
/// Names that reduce to nothing, `.` or `..` are rejected.
pub fn sanitize_filename(raw: &str) -> Result<&str, AppError> {
    let name = raw.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or_default();

    if name.is_empty() || name == "." || name == ".." {
        return Err(AppError::Validation(format!(
            "'{raw}' is not a usable file name"
        )));
    }

    if name != raw {
        warn!(original = %raw, stored_as = %name, "Stripped directory components from upload name");
    }

    Ok(name)
}

/// Writes `data` to `<dir>/<filename>`, replacing any existing file of that name.
pub async fn save_upload(dir: &Path, filename: &str, data: &[u8]) -> Result<PathBuf, AppError> {
    let name = sanitize_filename(filename)?;
    let path = dir.join(name);
    fs::write(&path, data).await?;
    Ok(path)
}

/// The acknowledgement returned to the client. No indexing actually happens.
pub fn upload_summary(filename: &str) -> String {
    format!(
        "File '{filename}' uploaded and indexed. It will be used to enhance AI-guided generation."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_keeps_plain_names() {
        assert_eq!(sanitize_filename("notes.txt").unwrap(), "notes.txt");
        assert_eq!(sanitize_filename("my notes.v2.docx").unwrap(), "my notes.v2.docx");
    }

    #[test]
    fn test_sanitize_strips_directory_components() {
        assert_eq!(sanitize_filename("../evil.txt").unwrap(), "evil.txt");
        assert_eq!(sanitize_filename("/etc/passwd").unwrap(), "passwd");
        assert_eq!(sanitize_filename("..\\..\\win.ini").unwrap(), "win.ini");
    }

    #[test]
    fn test_sanitize_rejects_empty_and_dot_names() {
        for raw in ["", ".", "..", "uploads/", "a/.."] {
            assert!(
                matches!(sanitize_filename(raw), Err(AppError::Validation(_))),
                "expected rejection for {raw:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_save_upload_writes_exact_bytes() {
        let dir = tempfile::tempdir().unwrap();
        let path = save_upload(dir.path(), "notes.txt", b"abc").await.unwrap();

        assert_eq!(path, dir.path().join("notes.txt"));
        assert_eq!(std::fs::read(&path).unwrap(), b"abc");
    }

    #[tokio::test]
    async fn test_save_upload_overwrites_same_name() {
        let dir = tempfile::tempdir().unwrap();
        save_upload(dir.path(), "plan.txt", b"first version").await.unwrap();
        save_upload(dir.path(), "plan.txt", b"v2").await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("plan.txt")).unwrap(), b"v2");
    }

    #[tokio::test]
    async fn test_save_upload_stays_inside_upload_dir() {
        let root = tempfile::tempdir().unwrap();
        let uploads = root.path().join("docs");
        std::fs::create_dir(&uploads).unwrap();

        save_upload(&uploads, "../escape.txt", b"x").await.unwrap();

        assert!(uploads.join("escape.txt").exists());
        assert!(!root.path().join("escape.txt").exists());
    }

    #[test]
    fn test_summary_names_the_file() {
        let summary = upload_summary("notes.txt");
        assert!(summary.contains("'notes.txt'"));
        assert!(summary.ends_with("enhance AI-guided generation."));
    }
}
