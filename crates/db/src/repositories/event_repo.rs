//! Repository for the `app.events` table.
//!
//! Events are ingested by the sensor pipeline, re-categorized by users,
//! and deleted when the tag they reference (by value) goes away. Listing
//! uses cursor pagination over `(start_timestamp, id)` to support
//! infinite-scroll clients.

use sqlx::PgPool;
use waterline_core::types::DbId;

use crate::models::event::{CreateEvent, Event, EventCursor, SortOrder};

const COLUMNS: &str = "id, household_id, category, tag_name, start_timestamp, end_timestamp, \
     duration_in_seconds, consumption_in_liters, notes, created_at, updated_at";

/// Provides CRUD and aggregate-support operations for events.
pub struct EventRepo;

impl EventRepo {
    /// Default page size for event listing.
    pub const DEFAULT_PAGE_LIMIT: i64 = 50;

    /// Maximum page size for event listing.
    pub const MAX_PAGE_LIMIT: i64 = 200;

    /// Insert a new event, returning the created row.
    pub async fn create(
        pool: &PgPool,
        household_id: DbId,
        input: &CreateEvent,
    ) -> Result<Event, sqlx::Error> {
        let query = format!(
            "INSERT INTO app.events
                 (household_id, category, tag_name, start_timestamp, end_timestamp,
                  duration_in_seconds, consumption_in_liters, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(household_id)
            .bind(&input.category)
            .bind(&input.tag_name)
            .bind(input.start_timestamp)
            .bind(input.end_timestamp)
            .bind(input.duration_in_seconds)
            .bind(input.consumption_in_liters)
            .bind(&input.notes)
            .fetch_one(pool)
            .await
    }

    /// Find an event by ID within a household.
    pub async fn find_by_id(
        pool: &PgPool,
        household_id: DbId,
        id: DbId,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM app.events WHERE household_id = $1 AND id = $2");
        sqlx::query_as::<_, Event>(&query)
            .bind(household_id)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List one page of a household's events.
    ///
    /// Ordered by `(start_timestamp, id)` in the requested direction; the
    /// cursor, when present, is the last-seen pair from the previous page
    /// and the page resumes strictly after it. `limit` is clamped to
    /// [`Self::MAX_PAGE_LIMIT`].
    pub async fn list_page(
        pool: &PgPool,
        household_id: DbId,
        limit: Option<i64>,
        cursor: Option<&EventCursor>,
        order: SortOrder,
    ) -> Result<Vec<Event>, sqlx::Error> {
        let limit = limit
            .unwrap_or(Self::DEFAULT_PAGE_LIMIT)
            .clamp(1, Self::MAX_PAGE_LIMIT);
        let (comparison, direction) = match order {
            SortOrder::Asc => (">", "ASC"),
            SortOrder::Desc => ("<", "DESC"),
        };

        match cursor {
            Some(cursor) => {
                let query = format!(
                    "SELECT {COLUMNS} FROM app.events
                     WHERE household_id = $1
                       AND (start_timestamp, id) {comparison} ($2, $3)
                     ORDER BY start_timestamp {direction}, id {direction}
                     LIMIT $4"
                );
                sqlx::query_as::<_, Event>(&query)
                    .bind(household_id)
                    .bind(cursor.start_timestamp)
                    .bind(cursor.id)
                    .bind(limit)
                    .fetch_all(pool)
                    .await
            }
            None => {
                let query = format!(
                    "SELECT {COLUMNS} FROM app.events
                     WHERE household_id = $1
                     ORDER BY start_timestamp {direction}, id {direction}
                     LIMIT $2"
                );
                sqlx::query_as::<_, Event>(&query)
                    .bind(household_id)
                    .bind(limit)
                    .fetch_all(pool)
                    .await
            }
        }
    }

    /// Count a household's events in one category.
    pub async fn count_by_category(
        pool: &PgPool,
        household_id: DbId,
        category: &str,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM app.events WHERE household_id = $1 AND category = $2",
        )
        .bind(household_id)
        .bind(category)
        .fetch_one(pool)
        .await
    }

    /// Set or clear an event's tag.
    ///
    /// Returns `None` if no row with the given `id` exists in the household.
    pub async fn set_tag(
        pool: &PgPool,
        household_id: DbId,
        id: DbId,
        tag_name: Option<&str>,
    ) -> Result<Option<Event>, sqlx::Error> {
        let query = format!(
            "UPDATE app.events SET tag_name = $3, updated_at = NOW()
             WHERE household_id = $1 AND id = $2
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Event>(&query)
            .bind(household_id)
            .bind(id)
            .bind(tag_name)
            .fetch_optional(pool)
            .await
    }

    /// Delete all events carrying a tag value within an existing
    /// transaction. Returns the number of rows removed.
    ///
    /// Part of the tag update/delete cascade: events reference tags by
    /// (category, name), so the cascade must run in the same transaction
    /// as the tag mutation.
    pub async fn delete_by_tag_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        household_id: DbId,
        category: &str,
        tag_name: &str,
    ) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM app.events
             WHERE household_id = $1 AND category = $2 AND tag_name = $3",
        )
        .bind(household_id)
        .bind(category)
        .bind(tag_name)
        .execute(&mut **tx)
        .await?;
        Ok(result.rows_affected())
    }
}
