//! Image upload rules: accepted types, size cap, and stored file naming.

use serde::Serialize;
use uuid::Uuid;

use crate::error::CoreError;
use crate::types::Timestamp;

/// MIME types accepted for captured inspection images.
pub const ALLOWED_IMAGE_TYPES: &[&str] = &["image/jpeg", "image/png"];

/// Default upload cap: 5 MiB.
pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// URL prefix under which stored uploads are served.
pub const UPLOAD_URL_PREFIX: &str = "/static/uploads";

/// Response body for a completed upload.
#[derive(Debug, Clone, Serialize)]
pub struct ImageUploadResponse {
    pub file_id: Uuid,
    pub file_name: String,
    pub file_url: String,
    pub size_bytes: u64,
    pub uploaded_at: Timestamp,
}

/// Reject content types outside [`ALLOWED_IMAGE_TYPES`].
pub fn validate_content_type(content_type: Option<&str>) -> Result<&'static str, CoreError> {
    let ct = content_type.unwrap_or("");
    ALLOWED_IMAGE_TYPES
        .iter()
        .copied()
        .find(|allowed| *allowed == ct)
        .ok_or_else(|| {
            CoreError::Validation(format!(
                "Invalid file type '{ct}'. Allowed: {}",
                ALLOWED_IMAGE_TYPES.join(", ")
            ))
        })
}

/// Build the on-disk name: `{file_id}_{YYYYMMDD_HHMMSS}.{ext}`.
///
/// The extension is derived from the validated content type only, so the
/// static file server always answers with an image MIME type. Nothing from
/// the client filename reaches the filesystem.
pub fn stored_file_name(file_id: Uuid, content_type: &str, now: Timestamp) -> String {
    format!(
        "{file_id}_{}.{}",
        now.format("%Y%m%d_%H%M%S"),
        extension_for(content_type)
    )
}

/// Public URL for a stored upload.
pub fn public_url(file_name: &str) -> String {
    format!("{UPLOAD_URL_PREFIX}/{file_name}")
}

fn extension_for(content_type: &str) -> &'static str {
    match content_type {
        "image/png" => "png",
        _ => "jpg",
    }
}
