//! Repository for the `sites` table.

use sqlx::PgPool;
use stationhub_core::types::DbId;

use crate::models::site::{CreateSite, Site};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, record_capacity, created_at, updated_at";

/// Provides read and intake operations for sites.
pub struct SiteRepo;

impl SiteRepo {
    /// Insert a new site. A missing capacity is stored as `unknown`.
    pub async fn create(pool: &PgPool, input: &CreateSite) -> Result<Site, sqlx::Error> {
        let query = format!(
            "INSERT INTO sites (name, record_capacity)
             VALUES ($1, COALESCE($2, 'unknown'))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Site>(&query)
            .bind(&input.name)
            .bind(&input.record_capacity)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Site>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sites WHERE id = $1");
        sqlx::query_as::<_, Site>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all sites ordered by ID.
    ///
    /// The ranking relies on this order to break score ties deterministically.
    pub async fn list(pool: &PgPool) -> Result<Vec<Site>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM sites ORDER BY id");
        sqlx::query_as::<_, Site>(&query).fetch_all(pool).await
    }
}
