//! Household membership model.

use serde::Serialize;
use sqlx::FromRow;
use waterline_core::types::{DbId, Timestamp};

/// A membership row from the `app.household_users` table.
///
/// The `role` is scoped to this household only; see
/// [`waterline_core::roles`] for the valid values.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HouseholdUser {
    pub id: DbId,
    pub household_id: DbId,
    pub user_id: DbId,
    pub role: String,
    pub created_at: Timestamp,
}

/// A member listing entry: membership joined with the user's public info.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HouseholdMember {
    pub user_id: DbId,
    pub name: String,
    pub email: String,
    pub role: String,
}
