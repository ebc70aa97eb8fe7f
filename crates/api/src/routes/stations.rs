//! Route definitions for the `/stations` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::{inspections, stations};
use crate::state::AppState;

/// Routes mounted at `/stations`.
///
/// ```text
/// GET    /                    -> list_stations
/// POST   /                    -> create_station
/// GET    /{id}                -> get_station
/// PUT    /{id}                -> update_station
/// DELETE /{id}                -> delete_station
/// GET    /{id}/inspections    -> list_station_inspections
/// POST   /{id}/inspections    -> create_inspection
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(stations::list_stations).post(stations::create_station),
        )
        .route(
            "/{id}",
            get(stations::get_station)
                .put(stations::update_station)
                .delete(stations::delete_station),
        )
        .route(
            "/{id}/inspections",
            get(inspections::list_station_inspections).post(inspections::create_inspection),
        )
}
