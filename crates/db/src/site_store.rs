//! Postgres implementation of the ranking engine's site/job store.

use async_trait::async_trait;
use sqlx::PgPool;
use stationhub_core::error::CoreError;
use stationhub_core::priority::PriorityCount;
use stationhub_core::ranking::{Site, SiteJobStore};
use stationhub_core::types::DbId;

use crate::repositories::{JobRepo, SiteRepo};

/// [`SiteJobStore`] backed by the `sites` and `jobs` tables.
#[derive(Clone)]
pub struct PgSiteStore {
    pool: PgPool,
}

impl PgSiteStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SiteJobStore for PgSiteStore {
    async fn list_sites(&self) -> Result<Vec<Site>, CoreError> {
        let sites = SiteRepo::list(&self.pool).await.map_err(internal)?;
        Ok(sites.into_iter().map(Site::from).collect())
    }

    async fn count_pending_jobs_by_priority(
        &self,
        site_id: DbId,
    ) -> Result<Vec<PriorityCount>, CoreError> {
        JobRepo::count_pending_by_priority(&self.pool, site_id)
            .await
            .map_err(internal)
    }
}

fn internal(err: sqlx::Error) -> CoreError {
    CoreError::Internal(format!("site store query failed: {err}"))
}
