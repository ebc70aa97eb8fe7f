//! Shared query parameter types for API handlers.
//!
//! Raw `?key=value` structs live here; each converts into the validated
//! core types before any repository is touched.

use serde::Deserialize;
use stationhub_core::error::CoreError;
use stationhub_core::inspection::{split_list, InspectionFilter, InspectionOutcome};
use stationhub_core::pagination::PageRequest;
use stationhub_core::types::{DbId, Timestamp};

/// Page-number pagination parameters (`?page=&page_size=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl PaginationParams {
    pub fn page_request(&self) -> Result<PageRequest, CoreError> {
        PageRequest::new(self.page, self.page_size)
    }
}

/// Query parameters for inspection listings.
///
/// `tags` and `criteria` are comma-separated. Dates are RFC 3339.
#[derive(Debug, Default, Deserialize)]
pub struct InspectionListParams {
    pub station_id: Option<DbId>,
    pub product: Option<String>,
    pub outcome: Option<String>,
    pub q: Option<String>,
    pub tags: Option<String>,
    pub criteria: Option<String>,
    pub date_from: Option<Timestamp>,
    pub date_to: Option<Timestamp>,
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl InspectionListParams {
    /// Validate into a normalized filter and a page request.
    pub fn into_parts(self) -> Result<(InspectionFilter, PageRequest), CoreError> {
        let page = PageRequest::new(self.page, self.page_size)?;
        let outcome = self
            .outcome
            .as_deref()
            .map(str::trim)
            .filter(|o| !o.is_empty())
            .map(InspectionOutcome::from_name)
            .transpose()?;

        let filter = InspectionFilter {
            station_id: self.station_id,
            product: self.product,
            outcome,
            search: self.q,
            tags: split_list(self.tags.as_deref()),
            criteria: split_list(self.criteria.as_deref()),
            date_from: self.date_from,
            date_to: self.date_to,
        }
        .normalized()?;

        Ok((filter, page))
    }
}

/// Query parameters for `GET /sites/prioritized`.
#[derive(Debug, Default, Deserialize)]
pub struct RankParams {
    /// Keep only the top `limit` sites. Missing or `<= 0` keeps all.
    pub limit: Option<i64>,
}
