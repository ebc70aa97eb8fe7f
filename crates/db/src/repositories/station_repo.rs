//! Repository for the `inspection_stations` table.
//!
//! Every read and write is scoped to an owner: a station belonging to another
//! user behaves exactly like a missing one.

use sqlx::PgPool;
use stationhub_core::pagination::PageRequest;
use stationhub_core::types::DbId;

use crate::models::station::{CreateStation, InspectionStation, UpdateStation};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str =
    "id, owner_id, name, description, product, criteria, created_at, updated_at";

/// Provides owner-scoped CRUD operations for inspection stations.
pub struct StationRepo;

impl StationRepo {
    /// Insert a new station owned by `owner_id`, returning the created row.
    pub async fn create(
        pool: &PgPool,
        owner_id: DbId,
        input: &CreateStation,
    ) -> Result<InspectionStation, sqlx::Error> {
        let query = format!(
            "INSERT INTO inspection_stations (owner_id, name, description, product, criteria)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InspectionStation>(&query)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.product)
            .bind(&input.criteria)
            .fetch_one(pool)
            .await
    }

    /// Find a station by ID, only if owned by `owner_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<InspectionStation>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM inspection_stations WHERE id = $1 AND owner_id = $2");
        sqlx::query_as::<_, InspectionStation>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// One page of the owner's stations, newest first, plus the total count.
    pub async fn list_owned(
        pool: &PgPool,
        owner_id: DbId,
        page: PageRequest,
    ) -> Result<(Vec<InspectionStation>, i64), sqlx::Error> {
        let total = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM inspection_stations WHERE owner_id = $1",
        )
        .bind(owner_id)
        .fetch_one(pool)
        .await?;

        let query = format!(
            "SELECT {COLUMNS} FROM inspection_stations
             WHERE owner_id = $1
             ORDER BY created_at DESC, id DESC
             LIMIT $2 OFFSET $3"
        );
        let rows = sqlx::query_as::<_, InspectionStation>(&query)
            .bind(owner_id)
            .bind(page.page_size())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((rows, total))
    }

    /// Update a station. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no station with `id` is owned by `owner_id`.
    pub async fn update_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateStation,
    ) -> Result<Option<InspectionStation>, sqlx::Error> {
        let query = format!(
            "UPDATE inspection_stations SET
                name = COALESCE($3, name),
                description = COALESCE($4, description),
                product = COALESCE($5, product),
                criteria = COALESCE($6, criteria)
             WHERE id = $1 AND owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InspectionStation>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(&input.name)
            .bind(&input.description)
            .bind(&input.product)
            .bind(&input.criteria)
            .fetch_optional(pool)
            .await
    }

    /// Delete a station and, by cascade, its inspection results.
    ///
    /// Returns `true` if a row owned by `owner_id` was removed.
    pub async fn delete_owned(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM inspection_stations WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
