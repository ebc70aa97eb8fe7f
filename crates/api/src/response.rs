//! Shared response envelope types for API handlers.
//!
//! Single resources use a `{ "data": ... }` envelope. Paginated listings use
//! [`stationhub_core::pagination::Page`], which adds `total`, `page`, and
//! `page_size` next to `data`.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(DataResponse { data: items }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
