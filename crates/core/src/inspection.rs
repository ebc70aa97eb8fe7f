//! Inspection outcomes and list-filter validation.
//!
//! The filter is validated here, before any query is built, so malformed
//! predicates surface as [`CoreError::Validation`] instead of reaching the
//! database.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::tags::validate_tags;
use crate::types::{DbId, Timestamp};

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// Result of a single inspection. New results start as `Pending`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InspectionOutcome {
    Pass,
    Fail,
    #[default]
    Pending,
}

impl InspectionOutcome {
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "pass" => Ok(Self::Pass),
            "fail" => Ok(Self::Fail),
            "pending" => Ok(Self::Pending),
            other => Err(CoreError::Validation(format!(
                "Invalid inspection outcome '{other}'. Must be one of: pass, fail, pending"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Pending => "pending",
        }
    }
}

// ---------------------------------------------------------------------------
// Filter
// ---------------------------------------------------------------------------

/// Optional predicates over inspection results, AND-combined.
///
/// The owner predicate is not part of the filter: repositories always apply
/// it from the authenticated user.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InspectionFilter {
    pub station_id: Option<DbId>,
    pub product: Option<String>,
    pub outcome: Option<InspectionOutcome>,
    /// Free text matched against station name, description, or product.
    pub search: Option<String>,
    /// Result must carry every one of these tags.
    pub tags: Vec<String>,
    /// Station criteria must include every one of these entries.
    pub criteria: Vec<String>,
    /// Inclusive lower bound on `created_at`.
    pub date_from: Option<Timestamp>,
    /// Inclusive upper bound on `created_at`.
    pub date_to: Option<Timestamp>,
}

impl InspectionFilter {
    /// Trim and normalize predicates, rejecting contradictory ones.
    ///
    /// Blank text predicates are dropped rather than matched literally.
    pub fn normalized(mut self) -> Result<Self, CoreError> {
        self.product = non_blank(self.product);
        self.search = non_blank(self.search);
        self.tags = validate_tags(&self.tags)?;
        self.criteria = self
            .criteria
            .into_iter()
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .collect();

        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(CoreError::Validation(format!(
                    "date_from ({from}) must not be after date_to ({to})"
                )));
            }
        }

        Ok(self)
    }

    /// `ILIKE` pattern for the free-text predicate, if any.
    pub fn search_pattern(&self) -> Option<String> {
        self.search.as_deref().map(like_pattern)
    }
}

/// Split a comma-separated query value (`?tags=a,b`) into trimmed entries.
pub fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect()
    })
    .unwrap_or_default()
}

/// Wrap `text` in `%...%`, escaping LIKE metacharacters so user input only
/// ever matches literally.
pub fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

// ---------------------------------------------------------------------------
// Bulk selection
// ---------------------------------------------------------------------------

/// Maximum number of results addressed by one bulk request.
pub const MAX_BULK_IDS: usize = 100;

/// Check a bulk id list: non-empty, at most [`MAX_BULK_IDS`], duplicates dropped.
///
/// First-seen order is kept.
pub fn validate_bulk_ids(ids: &[DbId]) -> Result<Vec<DbId>, CoreError> {
    if ids.is_empty() {
        return Err(CoreError::Validation("At least one id is required".into()));
    }
    if ids.len() > MAX_BULK_IDS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_BULK_IDS} ids may be given at once"
        )));
    }

    let mut unique: Vec<DbId> = Vec::with_capacity(ids.len());
    for &id in ids {
        if !unique.contains(&id) {
            unique.push(id);
        }
    }
    Ok(unique)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, Utc};

    use super::*;

    #[test]
    fn outcome_parses_known_values() {
        assert_eq!(InspectionOutcome::from_name("pass").unwrap(), InspectionOutcome::Pass);
        assert_eq!(InspectionOutcome::from_name("fail").unwrap(), InspectionOutcome::Fail);
        assert_eq!(
            InspectionOutcome::from_name("pending").unwrap(),
            InspectionOutcome::Pending
        );
    }

    #[test]
    fn outcome_rejects_unknown_values() {
        assert_matches!(InspectionOutcome::from_name("PASS"), Err(CoreError::Validation(_)));
        assert_matches!(InspectionOutcome::from_name("ok"), Err(CoreError::Validation(_)));
    }

    #[test]
    fn default_outcome_is_pending() {
        assert_eq!(InspectionOutcome::default(), InspectionOutcome::Pending);
    }

    #[test]
    fn normalized_drops_blank_text() {
        let filter = InspectionFilter {
            product: Some("   ".into()),
            search: Some("".into()),
            ..Default::default()
        }
        .normalized()
        .unwrap();
        assert_eq!(filter.product, None);
        assert_eq!(filter.search, None);
    }

    #[test]
    fn normalized_normalizes_tags() {
        let filter = InspectionFilter {
            tags: vec!["Surface Crack".into(), "surface crack".into()],
            ..Default::default()
        }
        .normalized()
        .unwrap();
        assert_eq!(filter.tags, vec!["surface-crack".to_string()]);
    }

    #[test]
    fn inverted_date_range_is_rejected() {
        let now = Utc::now();
        let result = InspectionFilter {
            date_from: Some(now),
            date_to: Some(now - Duration::days(1)),
            ..Default::default()
        }
        .normalized();
        assert_matches!(result, Err(CoreError::Validation(_)));
    }

    #[test]
    fn equal_dates_are_allowed() {
        let now = Utc::now();
        let result = InspectionFilter {
            date_from: Some(now),
            date_to: Some(now),
            ..Default::default()
        }
        .normalized();
        assert!(result.is_ok());
    }

    #[test]
    fn like_pattern_escapes_metacharacters() {
        assert_eq!(like_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(like_pattern("plain"), "%plain%");
    }

    #[test]
    fn split_list_trims_and_drops_empty() {
        assert_eq!(
            split_list(Some(" a, ,b ,")),
            vec!["a".to_string(), "b".to_string()]
        );
        assert!(split_list(None).is_empty());
    }

    #[test]
    fn bulk_ids_are_deduplicated_in_order() {
        assert_eq!(validate_bulk_ids(&[3, 1, 3, 2, 1]).unwrap(), vec![3, 1, 2]);
    }

    #[test]
    fn empty_or_oversized_bulk_ids_are_rejected() {
        assert_matches!(validate_bulk_ids(&[]), Err(CoreError::Validation(_)));

        let ids: Vec<DbId> = (0..=MAX_BULK_IDS as DbId).collect();
        assert_matches!(validate_bulk_ids(&ids), Err(CoreError::Validation(_)));
    }
}
