//! Repository for the `app.tags` table.
//!
//! All operations are scoped by the owning household. Tag mutations that
//! must cascade to events (update, delete) run inside a unit-of-work
//! transaction, so the write methods here have `_in_tx` variants.

use sqlx::PgPool;
use waterline_core::types::DbId;

use crate::models::tag::Tag;

const COLUMNS: &str = "id, household_id, category, name, created_at, updated_at";

/// Provides CRUD operations for tags.
pub struct TagRepo;

impl TagRepo {
    /// Insert a new tag.
    ///
    /// Duplicates of (household, category, name) fail with a
    /// unique-constraint violation; the handler checks for an existing
    /// tag first so the usual duplicate path surfaces as a domain
    /// CONFLICT with no write attempted.
    pub async fn create(
        pool: &PgPool,
        household_id: DbId,
        category: &str,
        name: &str,
    ) -> Result<Tag, sqlx::Error> {
        let query = format!(
            "INSERT INTO app.tags (household_id, category, name)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(household_id)
            .bind(category)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// Find a tag by ID within a household.
    pub async fn find_by_id(
        pool: &PgPool,
        household_id: DbId,
        id: DbId,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM app.tags WHERE household_id = $1 AND id = $2");
        sqlx::query_as::<_, Tag>(&query)
            .bind(household_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find the tag with an exact (category, name) value in a household.
    pub async fn find_exact(
        pool: &PgPool,
        household_id: DbId,
        category: &str,
        name: &str,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM app.tags
             WHERE household_id = $1 AND category = $2 AND name = $3"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(household_id)
            .bind(category)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List a household's tags, optionally filtered by category.
    pub async fn list(
        pool: &PgPool,
        household_id: DbId,
        category: Option<&str>,
    ) -> Result<Vec<Tag>, sqlx::Error> {
        match category {
            Some(category) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM app.tags
                     WHERE household_id = $1 AND category = $2
                     ORDER BY name"
                );
                sqlx::query_as::<_, Tag>(&query)
                    .bind(household_id)
                    .bind(category)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM app.tags
                     WHERE household_id = $1
                     ORDER BY category, name"
                );
                sqlx::query_as::<_, Tag>(&query)
                    .bind(household_id)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Update a tag's category and/or name within an existing transaction.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        category: Option<&str>,
        name: Option<&str>,
    ) -> Result<Option<Tag>, sqlx::Error> {
        let query = format!(
            "UPDATE app.tags SET
                category = COALESCE($2, category),
                name = COALESCE($3, name),
                updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Tag>(&query)
            .bind(id)
            .bind(category)
            .bind(name)
            .fetch_optional(&mut **tx)
            .await
    }

    /// Delete a tag within an existing transaction.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM app.tags WHERE id = $1")
            .bind(id)
            .execute(&mut **tx)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
