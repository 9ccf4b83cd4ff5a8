//! Tag model and DTOs.
//!
//! A tag is a household-defined label refining a fixture category
//! (e.g. an "eco" cycle on the washer). Events reference tags by value
//! (category + name), so tag mutations cascade to events in an
//! application-level transaction rather than via foreign keys.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use waterline_core::types::{DbId, Timestamp};

/// A tag row from the `app.tags` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Tag {
    pub id: DbId,
    pub household_id: DbId,
    pub category: String,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new tag.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTag {
    pub category: String,
    pub name: String,
}

/// DTO for updating an existing tag.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateTag {
    pub category: Option<String>,
    pub name: Option<String>,
}

/// Query parameters for tag listing.
#[derive(Debug, Clone, Deserialize)]
pub struct TagListParams {
    /// Filter by fixture category (e.g. `"washer"`).
    pub category: Option<String>,
}
