//! Repository for the `jobs` table.

use sqlx::PgPool;
use stationhub_core::priority::{PriorityCount, JOB_STATUS_PENDING};
use stationhub_core::types::DbId;

use crate::models::site::{CreateJob, Job};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, site_id, task, status, created_at, updated_at";

/// Provides intake and backlog aggregation for jobs.
pub struct JobRepo;

impl JobRepo {
    /// Insert a job under `site_id`. A missing status is stored as `pending`.
    pub async fn create(
        pool: &PgPool,
        site_id: DbId,
        input: &CreateJob,
    ) -> Result<Job, sqlx::Error> {
        let query = format!(
            "INSERT INTO jobs (site_id, task, status)
             VALUES ($1, $2, COALESCE($3, $4))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Job>(&query)
            .bind(site_id)
            .bind(&input.task)
            .bind(&input.status)
            .bind(JOB_STATUS_PENDING)
            .fetch_one(pool)
            .await
    }

    /// Count pending jobs for a site, grouped by raw task class.
    pub async fn count_pending_by_priority(
        pool: &PgPool,
        site_id: DbId,
    ) -> Result<Vec<PriorityCount>, sqlx::Error> {
        let rows = sqlx::query_as::<_, (String, i64)>(
            "SELECT task, COUNT(*) FROM jobs
             WHERE site_id = $1 AND status = $2
             GROUP BY task
             ORDER BY task",
        )
        .bind(site_id)
        .bind(JOB_STATUS_PENDING)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|(task, count)| PriorityCount { task, count })
            .collect())
    }
}
