//! Route definitions for `/uploads`.

use axum::extract::DefaultBodyLimit;
use axum::routing::post;
use axum::Router;

use crate::handlers::uploads;
use crate::state::AppState;

/// Routes mounted at `/uploads`.
///
/// ```text
/// POST /images -> upload_image (multipart, field `file`)
/// ```
///
/// The body limit is lifted here; the handler enforces the configured cap
/// while streaming.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/images", post(uploads::upload_image))
        .layer(DefaultBodyLimit::disable())
}
