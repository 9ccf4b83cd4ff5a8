//! Repository for the `app.households` table.

use sqlx::PgPool;
use waterline_core::types::DbId;

use crate::models::household::{CreateHousehold, Household, UpdateHousehold};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, residents, sensor_id, street, city, postal_code, country, \
     created_at, updated_at";

/// Provides CRUD operations for households.
pub struct HouseholdRepo;

impl HouseholdRepo {
    /// Insert a new household, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateHousehold) -> Result<Household, sqlx::Error> {
        let query = format!(
            "INSERT INTO app.households (name, residents, sensor_id, street, city, postal_code, country)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Household>(&query)
            .bind(&input.name)
            .bind(input.residents)
            .bind(&input.sensor_id)
            .bind(&input.street)
            .bind(&input.city)
            .bind(&input.postal_code)
            .bind(&input.country)
            .fetch_one(pool)
            .await
    }

    /// Insert a new household within an existing transaction.
    ///
    /// Used by household creation, which atomically adds the creator as
    /// the first admin member.
    pub async fn create_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        input: &CreateHousehold,
    ) -> Result<Household, sqlx::Error> {
        let query = format!(
            "INSERT INTO app.households (name, residents, sensor_id, street, city, postal_code, country)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Household>(&query)
            .bind(&input.name)
            .bind(input.residents)
            .bind(&input.sensor_id)
            .bind(&input.street)
            .bind(&input.city)
            .bind(&input.postal_code)
            .bind(&input.country)
            .fetch_one(&mut **tx)
            .await
    }

    /// Find a household by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Household>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM app.households WHERE id = $1");
        sqlx::query_as::<_, Household>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List the households a user belongs to, most recently created first.
    pub async fn list_for_user(pool: &PgPool, user_id: DbId) -> Result<Vec<Household>, sqlx::Error> {
        sqlx::query_as::<_, Household>(
            "SELECT h.id, h.name, h.residents, h.sensor_id, h.street, h.city, h.postal_code, \
                    h.country, h.created_at, h.updated_at
             FROM app.households h
             JOIN app.household_users hu ON hu.household_id = h.id
             WHERE hu.user_id = $1
             ORDER BY h.created_at DESC",
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
    }

    /// Update a household. Only non-`None` fields in `input` are applied.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateHousehold,
    ) -> Result<Option<Household>, sqlx::Error> {
        let query = format!(
            "UPDATE app.households SET
                name = COALESCE($2, name),
                residents = COALESCE($3, residents),
                sensor_id = COALESCE($4, sensor_id),
                street = COALESCE($5, street),
                city = COALESCE($6, city),
                postal_code = COALESCE($7, postal_code),
                country = COALESCE($8, country),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Household>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.residents)
            .bind(&input.sensor_id)
            .bind(&input.street)
            .bind(&input.city)
            .bind(&input.postal_code)
            .bind(&input.country)
            .fetch_optional(pool)
            .await
    }

    /// Delete a household by ID. Memberships, tags, invitations, and
    /// events cascade via foreign keys. Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM app.households WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
