//! Inspection station model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stationhub_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `inspection_stations` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct InspectionStation {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub description: String,
    pub product: String,
    pub criteria: Vec<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a station. The owner comes from the authenticated user.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateStation {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[serde(default)]
    #[validate(length(max = 1000))]
    pub description: String,
    #[serde(default)]
    #[validate(length(max = 255))]
    pub product: String,
    #[serde(default)]
    #[validate(length(max = 100))]
    pub criteria: Vec<String>,
}

/// DTO for updating a station. All fields are optional.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateStation {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
    #[validate(length(max = 255))]
    pub product: Option<String>,
    #[validate(length(max = 100))]
    pub criteria: Option<Vec<String>>,
}
