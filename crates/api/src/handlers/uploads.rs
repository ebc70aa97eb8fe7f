//! Handler for inspection image uploads.

use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use stationhub_core::upload::{
    public_url, stored_file_name, validate_content_type, ImageUploadResponse,
};
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;
use crate::uploads::{ensure_upload_dir, write_capped};

/// POST /api/v1/uploads/images
///
/// Accepts a multipart form with a required `file` field holding a JPEG or
/// PNG image. Other fields are ignored.
pub async fn upload_image(
    auth: AuthUser,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    while let Some(mut field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = validate_content_type(field.content_type())?;

        let file_id = Uuid::new_v4();
        let uploaded_at = Utc::now();
        let file_name = stored_file_name(file_id, content_type, uploaded_at);

        let upload_dir = &state.config.upload_dir;
        ensure_upload_dir(upload_dir)
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to create upload dir: {e}")))?;

        let size_bytes = write_capped(
            &mut field,
            upload_dir,
            &file_name,
            state.config.max_upload_bytes,
        )
        .await?;

        tracing::info!(
            user_id = auth.user_id,
            file_id = %file_id,
            size_bytes,
            content_type,
            "Image uploaded",
        );

        let response = ImageUploadResponse {
            file_id,
            file_url: public_url(&file_name),
            file_name,
            size_bytes,
            uploaded_at,
        };
        return Ok((StatusCode::CREATED, Json(DataResponse { data: response })));
    }

    Err(AppError::BadRequest("Missing required 'file' field".into()))
}
