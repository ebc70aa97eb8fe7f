//! Size-capped streaming of a multipart field to disk.
//!
//! Chunks land in an anonymous temp file inside the upload directory and are
//! never held in memory whole. The temp file only takes its final name once
//! the whole field has been written; any error, or the request being dropped
//! mid-stream, unlinks it.

use std::path::Path;

use axum::extract::multipart::{Field, MultipartError};
use tempfile::NamedTempFile;
use tokio::io::AsyncWriteExt;

use crate::error::AppError;

/// Why a streamed write was abandoned.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("File exceeds the maximum size of {limit} bytes")]
    TooLarge { limit: u64 },

    #[error("Failed to read upload: {0}")]
    Read(#[from] MultipartError),

    #[error("Failed to write upload: {0}")]
    Io(#[from] std::io::Error),
}

impl From<UploadError> for AppError {
    fn from(err: UploadError) -> Self {
        match err {
            UploadError::TooLarge { .. } => AppError::PayloadTooLarge(err.to_string()),
            UploadError::Read(e) => AppError::BadRequest(format!("Failed to read upload: {e}")),
            UploadError::Io(e) => AppError::InternalError(format!("Failed to write upload: {e}")),
        }
    }
}

/// Create the upload directory if needed and check it accepts new files.
pub async fn ensure_upload_dir(upload_dir: &Path) -> std::io::Result<()> {
    tokio::fs::create_dir_all(upload_dir).await?;
    let meta = tokio::fs::metadata(upload_dir).await?;
    if meta.permissions().readonly() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "upload directory is read-only",
        ));
    }
    Ok(())
}

/// Stream `field` into `upload_dir/file_name`, writing at most `max_bytes`.
///
/// Returns the number of bytes written. Nothing is visible under
/// `file_name` unless the call returns `Ok`.
pub async fn write_capped(
    field: &mut Field<'_>,
    upload_dir: &Path,
    file_name: &str,
    max_bytes: u64,
) -> Result<u64, UploadError> {
    let (file, temp_path) = NamedTempFile::new_in(upload_dir)?.into_parts();
    let mut file = tokio::fs::File::from_std(file);
    let mut written: u64 = 0;

    // `temp_path` unlinks on drop, which covers early returns and cancellation.
    while let Some(chunk) = field.chunk().await? {
        written = written.saturating_add(chunk.len() as u64);
        if written > max_bytes {
            return Err(UploadError::TooLarge { limit: max_bytes });
        }
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    drop(file);

    temp_path
        .persist(upload_dir.join(file_name))
        .map_err(std::io::Error::from)?;
    Ok(written)
}
