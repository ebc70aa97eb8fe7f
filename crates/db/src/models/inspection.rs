//! Inspection result model and DTOs.

use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use stationhub_core::inspection::InspectionOutcome;
use stationhub_core::tags::TagOperation;
use stationhub_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `inspection_results` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InspectionResult {
    pub id: DbId,
    pub station_id: DbId,
    pub image_url: String,
    pub inspection_outcome: String,
    pub similarity_score: Option<f64>,
    pub notes: Option<String>,
    pub tags: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for recording a new inspection. The station comes from the path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInspectionResult {
    #[validate(length(min = 1, max = 2083))]
    pub image_url: String,
    /// Defaults to `pending` when omitted.
    pub inspection_outcome: Option<InspectionOutcome>,
    #[validate(range(min = 0.0, max = 1.0))]
    pub similarity_score: Option<f64>,
    #[validate(length(max = 1000))]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// DTO for updating an inspection. All fields are optional.
///
/// `similarity_score` and `notes` distinguish an absent key (keep) from an
/// explicit `null` (clear).
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateInspectionResult {
    #[validate(length(min = 1, max = 2083))]
    pub image_url: Option<String>,
    pub inspection_outcome: Option<InspectionOutcome>,
    #[serde(default, deserialize_with = "present")]
    #[validate(range(min = 0.0, max = 1.0))]
    pub similarity_score: Option<Option<f64>>,
    #[serde(default, deserialize_with = "present")]
    #[validate(length(max = 1000))]
    pub notes: Option<Option<String>>,
}

/// DTO for applying one update to several results at once.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct BulkUpdateResults {
    pub ids: Vec<DbId>,
    #[validate(nested)]
    pub changes: UpdateInspectionResult,
}

/// DTO for adding or removing tags across several results.
#[derive(Debug, Clone, Deserialize)]
pub struct BulkTagRequest {
    pub ids: Vec<DbId>,
    pub tags: Vec<String>,
    pub operation: TagOperation,
}

/// DTO for applying tags to an inspection.
#[derive(Debug, Clone, Deserialize)]
pub struct ApplyTagsRequest {
    /// Tag names to add. Normalized before storage.
    pub tags: Vec<String>,
}

/// Maps a present key to `Some`, so `null` becomes `Some(None)`.
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
