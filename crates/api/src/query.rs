//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use serde::Deserialize;
use waterline_core::consumption::Granularity;
use waterline_core::types::Timestamp;
use waterline_db::models::event::SortOrder;

/// Cursor pagination parameters (`?limit=&cursor=&order=`).
///
/// The cursor is the opaque `next_cursor` value from the previous page.
/// Limits are clamped in the repository layer.
#[derive(Debug, Deserialize)]
pub struct CursorParams {
    pub limit: Option<i64>,
    pub cursor: Option<String>,
    #[serde(default)]
    pub order: SortOrder,
}

/// Half-open date range parameters (`?start=&end=`), RFC 3339 timestamps.
#[derive(Debug, Deserialize)]
pub struct RangeParams {
    pub start: Timestamp,
    pub end: Timestamp,
}

/// Date range plus bucket size for granularity-bucketed consumption.
#[derive(Debug, Deserialize)]
pub struct BucketParams {
    pub start: Timestamp,
    pub end: Timestamp,
    pub granularity: Granularity,
}
