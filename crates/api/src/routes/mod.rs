pub mod auth;
pub mod health;
pub mod inspections;
pub mod sites;
pub mod stations;
pub mod uploads;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/me                                         current user
///
/// /stations                                        list, create
/// /stations/{id}                                   get, update, delete
/// /stations/{id}/inspections                       list, record result
///
/// /inspections                                     filtered list
/// /inspections/search                              free-text search
/// /inspections/{id}                                get, update, delete
/// /inspections/{id}/tags                           add tags
/// /inspections/{id}/tags/{tag}                     remove tag
///
/// /uploads/images                                  image upload (multipart)
///
/// /sites                                           list, create (create: admin)
/// /sites/prioritized                               ranked sites (?limit=)
/// /sites/{id}/jobs                                 queue a job (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/stations", stations::router())
        .nest("/inspections", inspections::router())
        .nest("/uploads", uploads::router())
        .nest("/sites", sites::router())
}
