//! Handlers for inspection results.
//!
//! Results are reached through their station's owner. A result under someone
//! else's station is reported exactly like a missing one.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use stationhub_core::error::CoreError;
use stationhub_core::inspection::validate_bulk_ids;
use stationhub_core::pagination::Page;
use stationhub_core::tags::{validate_tag, validate_tags, TagOperation};
use stationhub_core::types::DbId;
use stationhub_db::models::inspection::{
    ApplyTagsRequest, BulkTagRequest, BulkUpdateResults, CreateInspectionResult,
    UpdateInspectionResult,
};
use stationhub_db::repositories::{InspectionRepo, StationRepo};
use validator::Validate;

use super::stations::station_not_found;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::query::InspectionListParams;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Station-scoped
// ---------------------------------------------------------------------------

/// POST /api/v1/stations/{id}/inspections
///
/// Record a result under an owned station. Outcome defaults to `pending`.
pub async fn create_inspection(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(station_id): Path<DbId>,
    Json(input): Json<CreateInspectionResult>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let tags = validate_tags(&input.tags)?;

    let result = InspectionRepo::create_owned(&state.pool, station_id, auth.user_id, &input, &tags)
        .await?
        .ok_or_else(|| station_not_found(station_id))?;

    tracing::info!(
        inspection_id = result.id,
        station_id,
        user_id = auth.user_id,
        outcome = %result.inspection_outcome,
        "Inspection recorded",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: result })))
}

/// GET /api/v1/stations/{id}/inspections
///
/// Same filters as `GET /inspections`, pinned to one owned station.
pub async fn list_station_inspections(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(station_id): Path<DbId>,
    Query(params): Query<InspectionListParams>,
) -> AppResult<impl IntoResponse> {
    let (mut filter, page) = params.into_parts()?;

    StationRepo::find_owned(&state.pool, station_id, auth.user_id)
        .await?
        .ok_or_else(|| station_not_found(station_id))?;

    filter.station_id = Some(station_id);
    let (rows, total) =
        InspectionRepo::list_filtered(&state.pool, auth.user_id, &filter, page).await?;

    Ok(Json(Page::new(rows, total, page)))
}

// ---------------------------------------------------------------------------
// Listing and search
// ---------------------------------------------------------------------------

/// GET /api/v1/inspections
///
/// Filtered, paginated listing across all of the caller's stations.
pub async fn list_inspections(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<InspectionListParams>,
) -> AppResult<impl IntoResponse> {
    let (filter, page) = params.into_parts()?;

    let (rows, total) =
        InspectionRepo::list_filtered(&state.pool, auth.user_id, &filter, page).await?;

    tracing::debug!(user_id = auth.user_id, total, page = page.page(), "Inspections listed");

    Ok(Json(Page::new(rows, total, page)))
}

/// GET /api/v1/inspections/search?q=
///
/// The listing endpoint with a mandatory search term.
pub async fn search_inspections(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<InspectionListParams>,
) -> AppResult<impl IntoResponse> {
    let (filter, page) = params.into_parts()?;
    if filter.search.is_none() {
        return Err(AppError::Core(CoreError::Validation(
            "Search text 'q' must not be empty".into(),
        )));
    }

    let (rows, total) =
        InspectionRepo::list_filtered(&state.pool, auth.user_id, &filter, page).await?;

    Ok(Json(Page::new(rows, total, page)))
}

// ---------------------------------------------------------------------------
// Single result
// ---------------------------------------------------------------------------

/// GET /api/v1/inspections/{id}
pub async fn get_inspection(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let result = InspectionRepo::find_owned(&state.pool, id, auth.user_id)
        .await?
        .ok_or_else(|| inspection_not_found(id))?;

    Ok(Json(DataResponse { data: result }))
}

/// PUT /api/v1/inspections/{id}
pub async fn update_inspection(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateInspectionResult>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let result = InspectionRepo::update_owned(&state.pool, id, auth.user_id, &input)
        .await?
        .ok_or_else(|| inspection_not_found(id))?;

    tracing::info!(inspection_id = id, user_id = auth.user_id, "Inspection updated");

    Ok(Json(DataResponse { data: result }))
}

/// DELETE /api/v1/inspections/{id}
pub async fn delete_inspection(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if !InspectionRepo::delete_owned(&state.pool, id, auth.user_id).await? {
        return Err(inspection_not_found(id));
    }

    tracing::info!(inspection_id = id, user_id = auth.user_id, "Inspection deleted");

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Tags
// ---------------------------------------------------------------------------

/// POST /api/v1/inspections/{id}/tags
///
/// Add tags to a result. Tags already present are left alone.
pub async fn add_tags(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<ApplyTagsRequest>,
) -> AppResult<impl IntoResponse> {
    let tags = validate_tags(&input.tags)?;
    if tags.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one tag is required".into(),
        )));
    }

    let result = InspectionRepo::add_tags_owned(&state.pool, id, auth.user_id, &tags)
        .await?
        .ok_or_else(|| inspection_not_found(id))?;

    tracing::info!(inspection_id = id, user_id = auth.user_id, count = tags.len(), "Tags applied");

    Ok(Json(DataResponse { data: result }))
}

/// DELETE /api/v1/inspections/{id}/tags/{tag}
pub async fn remove_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    Path((id, tag)): Path<(DbId, String)>,
) -> AppResult<impl IntoResponse> {
    let tag = validate_tag(&tag)?;

    let result = InspectionRepo::remove_tag_owned(&state.pool, id, auth.user_id, &tag)
        .await?
        .ok_or_else(|| inspection_not_found(id))?;

    tracing::info!(inspection_id = id, user_id = auth.user_id, tag = %tag, "Tag removed");

    Ok(Json(DataResponse { data: result }))
}

// ---------------------------------------------------------------------------
// Bulk
// ---------------------------------------------------------------------------

/// PUT /api/v1/inspections/bulk
///
/// Apply one patch to several results. Ids the caller does not own are
/// skipped; the response lists only the rows that changed.
pub async fn bulk_update_inspections(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BulkUpdateResults>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let ids = validate_bulk_ids(&input.ids)?;

    let results =
        InspectionRepo::bulk_update_owned(&state.pool, &ids, auth.user_id, &input.changes).await?;

    tracing::info!(
        user_id = auth.user_id,
        requested = ids.len(),
        updated = results.len(),
        "Inspections bulk updated",
    );

    Ok(Json(DataResponse { data: results }))
}

/// POST /api/v1/inspections/tags/bulk
///
/// Add or remove the same tags on several results.
pub async fn bulk_tag_inspections(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<BulkTagRequest>,
) -> AppResult<impl IntoResponse> {
    let ids = validate_bulk_ids(&input.ids)?;
    let tags = validate_tags(&input.tags)?;
    if tags.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "At least one tag is required".into(),
        )));
    }

    let results = match input.operation {
        TagOperation::Add => {
            InspectionRepo::bulk_add_tags_owned(&state.pool, &ids, auth.user_id, &tags).await?
        }
        TagOperation::Remove => {
            InspectionRepo::bulk_remove_tags_owned(&state.pool, &ids, auth.user_id, &tags).await?
        }
    };

    tracing::info!(
        user_id = auth.user_id,
        operation = ?input.operation,
        tags = tags.len(),
        updated = results.len(),
        "Inspection tags bulk applied",
    );

    Ok(Json(DataResponse { data: results }))
}

fn inspection_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "InspectionResult",
        id,
    })
}
