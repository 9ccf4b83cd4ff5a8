//! Repository for the `app.household_users` membership table.

use sqlx::PgPool;
use waterline_core::types::DbId;

use crate::models::household_user::{HouseholdMember, HouseholdUser};

const COLUMNS: &str = "id, household_id, user_id, role, created_at";

/// Provides membership operations for households.
pub struct HouseholdUserRepo;

impl HouseholdUserRepo {
    /// Add a user to a household with the given role.
    ///
    /// Fails with a unique-constraint violation if the user is already a
    /// member (classified as CONFLICT at the API boundary).
    pub async fn add(
        pool: &PgPool,
        household_id: DbId,
        user_id: DbId,
        role: &str,
    ) -> Result<HouseholdUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO app.household_users (household_id, user_id, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HouseholdUser>(&query)
            .bind(household_id)
            .bind(user_id)
            .bind(role)
            .fetch_one(pool)
            .await
    }

    /// Add a membership within an existing transaction.
    pub async fn add_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        household_id: DbId,
        user_id: DbId,
        role: &str,
    ) -> Result<HouseholdUser, sqlx::Error> {
        let query = format!(
            "INSERT INTO app.household_users (household_id, user_id, role)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HouseholdUser>(&query)
            .bind(household_id)
            .bind(user_id)
            .bind(role)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a user's membership in a household.
    pub async fn find(
        pool: &PgPool,
        household_id: DbId,
        user_id: DbId,
    ) -> Result<Option<HouseholdUser>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM app.household_users
             WHERE household_id = $1 AND user_id = $2"
        );
        sqlx::query_as::<_, HouseholdUser>(&query)
            .bind(household_id)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// List all members of a household with their public user info.
    pub async fn list_members(
        pool: &PgPool,
        household_id: DbId,
    ) -> Result<Vec<HouseholdMember>, sqlx::Error> {
        sqlx::query_as::<_, HouseholdMember>(
            "SELECT hu.user_id, u.name, u.email, hu.role
             FROM app.household_users hu
             JOIN auth.users u ON u.id = hu.user_id
             WHERE hu.household_id = $1
             ORDER BY hu.created_at",
        )
        .bind(household_id)
        .fetch_all(pool)
        .await
    }

    /// Remove a user's membership. Returns `true` if a row was removed.
    pub async fn remove(
        pool: &PgPool,
        household_id: DbId,
        user_id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM app.household_users WHERE household_id = $1 AND user_id = $2",
        )
        .bind(household_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Count the admins of a household. Used to protect the last admin.
    pub async fn count_admins(pool: &PgPool, household_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM app.household_users
             WHERE household_id = $1 AND role = 'admin'",
        )
        .bind(household_id)
        .fetch_one(pool)
        .await
    }
}
