//! Handlers for the `/stations` resource.
//!
//! Stations are private to their owner; another user's station answers 404.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use stationhub_core::error::CoreError;
use stationhub_core::pagination::Page;
use stationhub_core::types::DbId;
use stationhub_db::models::station::{CreateStation, UpdateStation};
use stationhub_db::repositories::StationRepo;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::PaginationParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /api/v1/stations
pub async fn create_station(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateStation>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let station = StationRepo::create(&state.pool, auth.user_id, &input).await?;

    tracing::info!(station_id = station.id, user_id = auth.user_id, "Station created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: station })))
}

/// GET /api/v1/stations
pub async fn list_stations(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<PaginationParams>,
) -> AppResult<impl IntoResponse> {
    let page = params.page_request()?;
    let (stations, total) = StationRepo::list_owned(&state.pool, auth.user_id, page).await?;

    Ok(Json(Page::new(stations, total, page)))
}

/// GET /api/v1/stations/{id}
pub async fn get_station(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let station = StationRepo::find_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| station_not_found(id))?;

    Ok(Json(DataResponse { data: station }))
}

/// PUT /api/v1/stations/{id}
///
/// Partial update: omitted fields keep their current values.
pub async fn update_station(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateStation>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let station = StationRepo::update_owned(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(|| station_not_found(id))?;

    tracing::info!(station_id = id, user_id = auth.user_id, "Station updated");

    Ok(Json(DataResponse { data: station }))
}

/// DELETE /api/v1/stations/{id}
///
/// Removes the station together with its inspection results.
pub async fn delete_station(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !StationRepo::delete_owned(&state.pool, id, auth.user_id).await? {
        return Err(station_not_found(id));
    }

    tracing::info!(station_id = id, user_id = auth.user_id, "Station deleted");

    Ok(StatusCode::NO_CONTENT)
}

pub(crate) fn station_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "InspectionStation",
        id,
    })
}
