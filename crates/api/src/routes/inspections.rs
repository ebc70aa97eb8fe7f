//! Route definitions for the `/inspections` resource.

use axum::routing::{delete, get, post, put};
use axum::Router;

use crate::handlers::inspections;
use crate::state::AppState;

/// Routes mounted at `/inspections`.
///
/// ```text
/// GET    /                  -> list_inspections
/// GET    /search            -> search_inspections
/// PUT    /bulk              -> bulk_update_inspections
/// POST   /tags/bulk         -> bulk_tag_inspections
/// GET    /{id}              -> get_inspection
/// PUT    /{id}              -> update_inspection
/// DELETE /{id}              -> delete_inspection
/// POST   /{id}/tags         -> add_tags
/// DELETE /{id}/tags/{tag}   -> remove_tag
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(inspections::list_inspections))
        .route("/search", get(inspections::search_inspections))
        .route("/bulk", put(inspections::bulk_update_inspections))
        .route("/tags/bulk", post(inspections::bulk_tag_inspections))
        .route(
            "/{id}",
            get(inspections::get_inspection)
                .put(inspections::update_inspection)
                .delete(inspections::delete_inspection),
        )
        .route("/{id}/tags", post(inspections::add_tags))
        .route("/{id}/tags/{tag}", delete(inspections::remove_tag))
}
