//! Site and job models used by the priority ranking.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stationhub_core::ranking;
use stationhub_core::types::{DbId, Timestamp};
use validator::Validate;

/// A row from the `sites` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Site {
    pub id: DbId,
    pub name: String,
    pub record_capacity: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl From<Site> for ranking::Site {
    fn from(site: Site) -> Self {
        Self {
            id: site.id,
            name: site.name,
            record_capacity: site.record_capacity,
        }
    }
}

/// DTO for creating a site.
///
/// `record_capacity` is free text; values outside `high`/`medium`/`low`
/// are stored as given and score zero.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateSite {
    #[validate(length(min = 1, max = 255))]
    pub name: String,
    #[validate(length(max = 50))]
    pub record_capacity: Option<String>,
}

/// A row from the `jobs` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Job {
    pub id: DbId,
    pub site_id: DbId,
    pub task: String,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a job under a site. The site comes from the path.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateJob {
    #[validate(length(min = 1, max = 50))]
    pub task: String,
    /// Defaults to `pending` when omitted.
    #[validate(length(min = 1, max = 50))]
    pub status: Option<String>,
}
