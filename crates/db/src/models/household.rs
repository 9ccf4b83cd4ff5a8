//! Household entity model and DTOs.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use waterline_core::types::{DbId, Timestamp};

/// A household row from the `app.households` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Household {
    pub id: DbId,
    pub name: String,
    /// Number of people living at the address. Always >= 1.
    pub residents: i32,
    /// 12-hex-digit identifier of the provisioned water sensor.
    pub sensor_id: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new household.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateHousehold {
    pub name: String,
    pub residents: i32,
    pub sensor_id: String,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}

/// DTO for updating an existing household. All fields are optional.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateHousehold {
    pub name: Option<String>,
    pub residents: Option<i32>,
    pub sensor_id: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postal_code: Option<String>,
    pub country: Option<String>,
}
