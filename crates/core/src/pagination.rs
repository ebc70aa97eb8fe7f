//! Page-number pagination.
//!
//! Pages are 1-based. A page past the end is not an error: it yields an empty
//! slice alongside the unchanged total.

use serde::Serialize;

use crate::error::CoreError;

/// Default number of rows per page.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum number of rows per page. Larger requests are clamped.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A validated `(page, page_size)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: i64,
    page_size: i64,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl PageRequest {
    /// Validate user-supplied values, applying defaults for missing ones.
    ///
    /// Non-positive values are rejected; `page_size` above
    /// [`MAX_PAGE_SIZE`] is clamped.
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Result<Self, CoreError> {
        let page = page.unwrap_or(1);
        let page_size = page_size.unwrap_or(DEFAULT_PAGE_SIZE);

        if page < 1 {
            return Err(CoreError::Validation(format!(
                "page must be a positive integer, got {page}"
            )));
        }
        if page_size < 1 {
            return Err(CoreError::Validation(format!(
                "page_size must be a positive integer, got {page_size}"
            )));
        }

        Ok(Self {
            page,
            page_size: page_size.min(MAX_PAGE_SIZE),
        })
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    /// SQL `LIMIT`.
    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// SQL `OFFSET`: `(page - 1) * page_size`, saturating.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

/// Paginated response envelope: `{ data, total, page, page_size }`.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T: Serialize> {
    pub data: Vec<T>,
    /// Rows matching the query before pagination.
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
}

impl<T: Serialize> Page<T> {
    pub fn new(data: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            data,
            total,
            page: request.page,
            page_size: request.page_size,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
