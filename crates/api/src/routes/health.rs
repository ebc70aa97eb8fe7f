//! Liveness report for load balancers and operators.
//!
//! Mounted at the root, outside `/api/v1`, and never requires a token.

use axum::extract::State;
use axum::{routing::get, Json, Router};
use serde::Serialize;

use crate::state::AppState;
use crate::uploads::ensure_upload_dir;

/// Body of `GET /health`.
///
/// `status` is `"ok"` only when both the database and the upload directory
/// are usable; otherwise `"degraded"`, still with a 200 so the process is
/// not restarted for a storage problem.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    pub db_healthy: bool,
    /// Image uploads can be written.
    pub uploads_ready: bool,
}

async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let db_healthy = stationhub_db::health_check(&state.pool).await.is_ok();

    let uploads_ready = match ensure_upload_dir(&state.config.upload_dir).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(
                upload_dir = %state.config.upload_dir.display(),
                error = %e,
                "Upload directory unavailable",
            );
            false
        }
    };

    Json(HealthResponse {
        status: if db_healthy && uploads_ready { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        db_healthy,
        uploads_ready,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health_check))
}
