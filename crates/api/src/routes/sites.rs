//! Route definitions for the `/sites` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::sites;
use crate::state::AppState;

/// Routes mounted at `/sites`.
///
/// ```text
/// GET  /             -> list_sites
/// POST /             -> create_site (admin)
/// GET  /prioritized  -> prioritized_sites (?limit=)
/// POST /{id}/jobs    -> create_job (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(sites::list_sites).post(sites::create_site))
        .route("/prioritized", get(sites::prioritized_sites))
        .route("/{id}/jobs", post(sites::create_job))
}
