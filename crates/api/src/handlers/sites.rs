//! Handlers for sites, their job intake, and the priority ranking.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use stationhub_core::error::CoreError;
use stationhub_core::types::DbId;
use stationhub_db::models::site::{CreateJob, CreateSite};
use stationhub_db::repositories::{JobRepo, SiteRepo};
use stationhub_db::site_store::PgSiteStore;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireAdmin;
use crate::query::RankParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/sites/prioritized?limit=
///
/// Every site with its score, highest first. `limit` keeps the top N.
pub async fn prioritized_sites(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<RankParams>,
) -> AppResult<impl IntoResponse> {
    let store = PgSiteStore::new(state.pool.clone());
    let ranked = state.ranker.rank(&store, params.limit).await?;

    tracing::info!(
        user_id = auth.user_id,
        limit = ?params.limit,
        returned = ranked.len(),
        "Sites prioritized",
    );

    Ok(Json(DataResponse { data: ranked }))
}

/// GET /api/v1/sites
pub async fn list_sites(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let sites = SiteRepo::list(&state.pool).await?;

    Ok(Json(DataResponse { data: sites }))
}

/// POST /api/v1/sites
///
/// Register a site. Admin only.
pub async fn create_site(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Json(input): Json<CreateSite>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let site = SiteRepo::create(&state.pool, &input).await?;

    tracing::info!(site_id = site.id, user_id = admin.user_id, "Site created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: site })))
}

/// POST /api/v1/sites/{id}/jobs
///
/// Queue a job against a site. Admin only.
pub async fn create_job(
    RequireAdmin(admin): RequireAdmin,
    State(state): State<AppState>,
    Path(site_id): Path<DbId>,
    Json(input): Json<CreateJob>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    SiteRepo::find_by_id(&state.pool, site_id)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::NotFound {
                entity: "Site",
                id: site_id,
            })
        })?;

    let job = JobRepo::create(&state.pool, site_id, &input).await?;

    tracing::info!(job_id = job.id, site_id, user_id = admin.user_id, task = %job.task, "Job queued");

    Ok((StatusCode::CREATED, Json(DataResponse { data: job })))
}
