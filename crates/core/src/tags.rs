//! Tag normalization for inspection results.
//!
//! Tags are stored normalized (trimmed, lowercase, inner whitespace collapsed
//! to `-`) so `"Scratch Mark"` and `"scratch-mark"` are the same tag and
//! containment filters match regardless of input casing.

use serde::Deserialize;

use crate::error::CoreError;

/// Maximum length of a normalized tag, in characters.
pub const MAX_TAG_LENGTH: usize = 50;

/// Maximum number of tags accepted in one request.
pub const MAX_TAGS_PER_REQUEST: usize = 20;

/// Normalize a single tag. Idempotent.
pub fn normalize_tag(raw: &str) -> String {
    raw.split_whitespace()
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}

/// Normalize and validate one tag.
pub fn validate_tag(raw: &str) -> Result<String, CoreError> {
    let tag = normalize_tag(raw);
    if tag.is_empty() {
        return Err(CoreError::Validation("Tags must not be empty".into()));
    }
    if tag.chars().count() > MAX_TAG_LENGTH {
        return Err(CoreError::Validation(format!(
            "Tag '{tag}' exceeds {MAX_TAG_LENGTH} characters"
        )));
    }
    Ok(tag)
}

/// Normalize, validate and de-duplicate a list of tags, keeping first-seen order.
pub fn validate_tags(raw: &[String]) -> Result<Vec<String>, CoreError> {
    if raw.len() > MAX_TAGS_PER_REQUEST {
        return Err(CoreError::Validation(format!(
            "At most {MAX_TAGS_PER_REQUEST} tags may be given at once"
        )));
    }

    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for r in raw {
        let tag = validate_tag(r)?;
        if !tags.contains(&tag) {
            tags.push(tag);
        }
    }
    Ok(tags)
}

/// What a bulk tag request does to each selected result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagOperation {
    Add,
    Remove,
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn normalize_lowercases_and_joins_words() {
        assert_eq!(normalize_tag("  Scratch   Mark "), "scratch-mark");
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = normalize_tag("Weld Seam  Gap");
        assert_eq!(normalize_tag(&once), once);
    }

    #[test]
    fn blank_tag_is_rejected() {
        assert_matches!(validate_tag("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn overlong_tag_is_rejected() {
        let long = "x".repeat(MAX_TAG_LENGTH + 1);
        assert_matches!(validate_tag(&long), Err(CoreError::Validation(_)));
    }

    #[test]
    fn duplicates_collapse_after_normalization() {
        let tags = validate_tags(&["Dent".into(), "dent".into(), " DENT ".into(), "burr".into()])
            .unwrap();
        assert_eq!(tags, vec!["dent".to_string(), "burr".to_string()]);
    }

    #[test]
    fn too_many_tags_rejected() {
        let raw: Vec<String> = (0..=MAX_TAGS_PER_REQUEST).map(|i| format!("t{i}")).collect();
        assert_matches!(validate_tags(&raw), Err(CoreError::Validation(_)));
    }
}
