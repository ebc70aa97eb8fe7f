//! Repository for the `inspection_results` table.
//!
//! Results are owned through their station: every query joins
//! `inspection_stations` and pins `owner_id`, so another user's result is
//! indistinguishable from a missing one.

use sqlx::postgres::PgArguments;
use sqlx::query::QueryAs;
use sqlx::{PgPool, Postgres};
use stationhub_core::inspection::{InspectionFilter, InspectionOutcome};
use stationhub_core::pagination::PageRequest;
use stationhub_core::types::DbId;

use crate::models::inspection::{CreateInspectionResult, InspectionResult, UpdateInspectionResult};

/// Column list for `inspection_results` aliased as `r`.
const COLUMNS: &str = "\
    r.id, r.station_id, r.image_url, r.inspection_outcome, r.similarity_score, \
    r.notes, r.tags, r.created_at, r.updated_at";

/// Owner-scoped filter predicates. Bind order must match [`bind_filter`].
const FILTER_WHERE: &str = "\
    s.owner_id = $1 \
    AND ($2::BIGINT IS NULL OR r.station_id = $2) \
    AND ($3::TEXT IS NULL OR s.product = $3) \
    AND ($4::TEXT IS NULL OR r.inspection_outcome = $4) \
    AND ($5::TEXT IS NULL OR s.name ILIKE $5 OR s.description ILIKE $5 OR s.product ILIKE $5) \
    AND (cardinality($6::TEXT[]) = 0 OR r.tags @> $6::TEXT[]) \
    AND (cardinality($7::TEXT[]) = 0 OR s.criteria @> $7::TEXT[]) \
    AND ($8::TIMESTAMPTZ IS NULL OR r.created_at >= $8) \
    AND ($9::TIMESTAMPTZ IS NULL OR r.created_at <= $9)";

/// Patch assignments shared by single and bulk updates. Binds `$3..=$8`,
/// see [`bind_update`].
const UPDATE_SET: &str = "\
    image_url = COALESCE($3, r.image_url), \
    inspection_outcome = COALESCE($4, r.inspection_outcome), \
    similarity_score = CASE WHEN $5 THEN $6 ELSE r.similarity_score END, \
    notes = CASE WHEN $7 THEN $8 ELSE r.notes END";

/// `r.tags` with `$3::TEXT[]` appended, first occurrence of each tag kept.
const MERGE_TAGS: &str = "\
    ARRAY(
        SELECT u.tag
        FROM unnest(r.tags || $3::TEXT[]) WITH ORDINALITY AS u(tag, ord)
        GROUP BY u.tag
        ORDER BY MIN(u.ord)
    )";

/// `r.tags` without any tag in `$3::TEXT[]`, order kept.
const STRIP_TAGS: &str = "\
    ARRAY(
        SELECT u.tag
        FROM unnest(r.tags) WITH ORDINALITY AS u(tag, ord)
        WHERE u.tag <> ALL($3::TEXT[])
        ORDER BY u.ord
    )";

/// Provides owner-scoped CRUD, filtering, and tagging for inspection results.
pub struct InspectionRepo;

impl InspectionRepo {
    /// Insert a result under `station_id` if the station is owned by `owner_id`.
    ///
    /// Returns `None` when the station is missing or belongs to someone else.
    /// `tags` must already be normalized.
    pub async fn create_owned(
        pool: &PgPool,
        station_id: DbId,
        owner_id: DbId,
        input: &CreateInspectionResult,
        tags: &[String],
    ) -> Result<Option<InspectionResult>, sqlx::Error> {
        let outcome = input.inspection_outcome.unwrap_or_default();
        let query = format!(
            "WITH inserted AS (
                 INSERT INTO inspection_results
                     (station_id, image_url, inspection_outcome, similarity_score, notes, tags)
                 SELECT s.id, $3, $4, $5, $6, $7
                 FROM inspection_stations s
                 WHERE s.id = $1 AND s.owner_id = $2
                 RETURNING *
             )
             SELECT {COLUMNS} FROM inserted r"
        );
        sqlx::query_as::<_, InspectionResult>(&query)
            .bind(station_id)
            .bind(owner_id)
            .bind(&input.image_url)
            .bind(outcome.name())
            .bind(input.similarity_score)
            .bind(&input.notes)
            .bind(tags)
            .fetch_optional(pool)
            .await
    }

    /// Find a result by ID, only if its station is owned by `owner_id`.
    pub async fn find_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
    ) -> Result<Option<InspectionResult>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS}
             FROM inspection_results r
             JOIN inspection_stations s ON s.id = r.station_id
             WHERE r.id = $1 AND s.owner_id = $2"
        );
        sqlx::query_as::<_, InspectionResult>(&query)
            .bind(id)
            .bind(owner_id)
            .fetch_optional(pool)
            .await
    }

    /// One page of results matching `filter`, plus the pre-pagination total.
    ///
    /// Ordered newest first with `id` as tie-breaker so pages never overlap.
    pub async fn list_filtered(
        pool: &PgPool,
        owner_id: DbId,
        filter: &InspectionFilter,
        page: PageRequest,
    ) -> Result<(Vec<InspectionResult>, i64), sqlx::Error> {
        let pattern = filter.search_pattern();

        let count_sql = format!(
            "SELECT COUNT(*)
             FROM inspection_results r
             JOIN inspection_stations s ON s.id = r.station_id
             WHERE {FILTER_WHERE}"
        );
        let (total,) = bind_filter(
            sqlx::query_as::<_, (i64,)>(&count_sql),
            owner_id,
            filter,
            &pattern,
        )
        .fetch_one(pool)
        .await?;

        let page_sql = format!(
            "SELECT {COLUMNS}
             FROM inspection_results r
             JOIN inspection_stations s ON s.id = r.station_id
             WHERE {FILTER_WHERE}
             ORDER BY r.created_at DESC, r.id DESC
             LIMIT $10 OFFSET $11"
        );
        let rows = bind_filter(
            sqlx::query_as::<_, InspectionResult>(&page_sql),
            owner_id,
            filter,
            &pattern,
        )
        .bind(page.page_size())
        .bind(page.offset())
        .fetch_all(pool)
        .await?;

        Ok((rows, total))
    }

    /// Update a result. Absent fields are kept; `notes` and
    /// `similarity_score` may be cleared with `Some(None)`.
    ///
    /// Returns `None` if no result with `id` belongs to `owner_id`.
    pub async fn update_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        input: &UpdateInspectionResult,
    ) -> Result<Option<InspectionResult>, sqlx::Error> {
        let query = format!(
            "UPDATE inspection_results r SET {UPDATE_SET}
             FROM inspection_stations s
             WHERE r.id = $1 AND s.id = r.station_id AND s.owner_id = $2
             RETURNING {COLUMNS}"
        );
        bind_update(
            sqlx::query_as::<_, InspectionResult>(&query)
                .bind(id)
                .bind(owner_id),
            input,
        )
        .fetch_optional(pool)
        .await
    }

    /// Apply one patch to every result in `ids` owned by `owner_id`.
    ///
    /// Ids that are missing or belong to someone else are skipped. Returns the
    /// updated rows ordered by id.
    pub async fn bulk_update_owned(
        pool: &PgPool,
        ids: &[DbId],
        owner_id: DbId,
        input: &UpdateInspectionResult,
    ) -> Result<Vec<InspectionResult>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                 UPDATE inspection_results r SET {UPDATE_SET}
                 FROM inspection_stations s
                 WHERE r.id = ANY($1) AND s.id = r.station_id AND s.owner_id = $2
                 RETURNING r.*
             )
             SELECT {COLUMNS} FROM updated r ORDER BY r.id"
        );
        bind_update(
            sqlx::query_as::<_, InspectionResult>(&query)
                .bind(ids)
                .bind(owner_id),
            input,
        )
        .fetch_all(pool)
        .await
    }

    /// Delete a result. Returns `true` if a row owned by `owner_id` was removed.
    pub async fn delete_owned(pool: &PgPool, id: DbId, owner_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM inspection_results r
             USING inspection_stations s
             WHERE r.id = $1 AND s.id = r.station_id AND s.owner_id = $2",
        )
        .bind(id)
        .bind(owner_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Append normalized `tags` to a result, skipping ones already present.
    ///
    /// Existing order is preserved and new tags follow in the given order.
    pub async fn add_tags_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        tags: &[String],
    ) -> Result<Option<InspectionResult>, sqlx::Error> {
        let query = format!(
            "UPDATE inspection_results r SET tags = {MERGE_TAGS}
             FROM inspection_stations s
             WHERE r.id = $1 AND s.id = r.station_id AND s.owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InspectionResult>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(tags)
            .fetch_optional(pool)
            .await
    }

    /// Remove one normalized tag from a result. Removing an absent tag is a no-op.
    pub async fn remove_tag_owned(
        pool: &PgPool,
        id: DbId,
        owner_id: DbId,
        tag: &str,
    ) -> Result<Option<InspectionResult>, sqlx::Error> {
        let query = format!(
            "UPDATE inspection_results r SET tags = array_remove(r.tags, $3)
             FROM inspection_stations s
             WHERE r.id = $1 AND s.id = r.station_id AND s.owner_id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, InspectionResult>(&query)
            .bind(id)
            .bind(owner_id)
            .bind(tag)
            .fetch_optional(pool)
            .await
    }

    /// Add normalized `tags` to every result in `ids` owned by `owner_id`.
    ///
    /// Same merge rule as [`Self::add_tags_owned`]; foreign ids are skipped.
    pub async fn bulk_add_tags_owned(
        pool: &PgPool,
        ids: &[DbId],
        owner_id: DbId,
        tags: &[String],
    ) -> Result<Vec<InspectionResult>, sqlx::Error> {
        Self::bulk_retag(pool, ids, owner_id, tags, MERGE_TAGS).await
    }

    /// Remove normalized `tags` from every result in `ids` owned by `owner_id`.
    pub async fn bulk_remove_tags_owned(
        pool: &PgPool,
        ids: &[DbId],
        owner_id: DbId,
        tags: &[String],
    ) -> Result<Vec<InspectionResult>, sqlx::Error> {
        Self::bulk_retag(pool, ids, owner_id, tags, STRIP_TAGS).await
    }

    async fn bulk_retag(
        pool: &PgPool,
        ids: &[DbId],
        owner_id: DbId,
        tags: &[String],
        tags_expr: &str,
    ) -> Result<Vec<InspectionResult>, sqlx::Error> {
        let query = format!(
            "WITH updated AS (
                 UPDATE inspection_results r SET tags = {tags_expr}
                 FROM inspection_stations s
                 WHERE r.id = ANY($1) AND s.id = r.station_id AND s.owner_id = $2
                 RETURNING r.*
             )
             SELECT {COLUMNS} FROM updated r ORDER BY r.id"
        );
        sqlx::query_as::<_, InspectionResult>(&query)
            .bind(ids)
            .bind(owner_id)
            .bind(tags)
            .fetch_all(pool)
            .await
    }
}

/// Bind `$1..=$9` of [`FILTER_WHERE`].
fn bind_filter<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    owner_id: DbId,
    filter: &'q InspectionFilter,
    pattern: &'q Option<String>,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    query
        .bind(owner_id)
        .bind(filter.station_id)
        .bind(filter.product.as_deref())
        .bind(filter.outcome.map(InspectionOutcome::name))
        .bind(pattern.as_deref())
        .bind(&filter.tags)
        .bind(&filter.criteria)
        .bind(filter.date_from)
        .bind(filter.date_to)
}

/// Bind `$3..=$8` of [`UPDATE_SET`].
fn bind_update<'q, O>(
    query: QueryAs<'q, Postgres, O, PgArguments>,
    input: &'q UpdateInspectionResult,
) -> QueryAs<'q, Postgres, O, PgArguments> {
    query
        .bind(input.image_url.as_deref())
        .bind(input.inspection_outcome.map(InspectionOutcome::name))
        .bind(input.similarity_score.is_some())
        .bind(input.similarity_score.flatten())
        .bind(input.notes.is_some())
        .bind(input.notes.as_ref().and_then(|v| v.as_deref()))
}
