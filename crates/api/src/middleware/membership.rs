//! Household membership authorization.
//!
//! Roles are scoped per household, so authorization cannot be decided
//! from the JWT alone: each household-scoped handler resolves the
//! caller's membership row after authentication. Reads require any
//! membership; destructive household operations require the `admin`
//! role.

use sqlx::PgPool;
use waterline_core::error::CoreError;
use waterline_core::roles::ROLE_ADMIN;
use waterline_core::types::DbId;
use waterline_db::models::household_user::HouseholdUser;
use waterline_db::repositories::{HouseholdRepo, HouseholdUserRepo};

use crate::error::{AppError, AppResult};

/// Require that `user_id` is a member of `household_id`.
///
/// Returns the membership row. A missing household yields NOT_FOUND; an
/// existing household the user does not belong to yields FORBIDDEN, so
/// members and strangers get distinguishable answers.
pub async fn require_member(
    pool: &PgPool,
    household_id: DbId,
    user_id: DbId,
) -> AppResult<HouseholdUser> {
    match HouseholdUserRepo::find(pool, household_id, user_id).await? {
        Some(membership) => Ok(membership),
        None => {
            if HouseholdRepo::find_by_id(pool, household_id).await?.is_none() {
                return Err(AppError::Core(CoreError::NotFound {
                    entity: "Household",
                    id: household_id,
                }));
            }
            Err(AppError::Core(CoreError::Forbidden(
                "Not a member of this household".into(),
            )))
        }
    }
}

/// Require that `user_id` is an admin of `household_id`.
pub async fn require_admin(
    pool: &PgPool,
    household_id: DbId,
    user_id: DbId,
) -> AppResult<HouseholdUser> {
    let membership = require_member(pool, household_id, user_id).await?;
    if membership.role != ROLE_ADMIN {
        return Err(AppError::Core(CoreError::Forbidden(
            "Household admin role required".into(),
        )));
    }
    Ok(membership)
}
