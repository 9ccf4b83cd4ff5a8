//! Aggregate queries over `app.events` backing the consumption analytics.
//!
//! Ranges are half-open: an event belongs to `[start, end)` when its
//! `start_timestamp` falls inside it. The per-range math (baseline
//! deviation, per-person normalization, bucketing) lives in
//! `waterline_core::consumption`; this repository only produces sums.

use sqlx::PgPool;
use waterline_core::types::{DbId, Timestamp};

use crate::models::consumption::CategoryConsumption;

/// Provides consumption aggregates computed from events.
pub struct ConsumptionRepo;

impl ConsumptionRepo {
    /// Total liters consumed by a household's events in `[start, end)`.
    pub async fn total_in_range(
        pool: &PgPool,
        household_id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<f64, sqlx::Error> {
        sqlx::query_scalar::<_, f64>(
            "SELECT COALESCE(SUM(consumption_in_liters), 0)
             FROM app.events
             WHERE household_id = $1 AND start_timestamp >= $2 AND start_timestamp < $3",
        )
        .bind(household_id)
        .bind(start)
        .bind(end)
        .fetch_one(pool)
        .await
    }

    /// Per-category liter sums for a household's events in `[start, end)`.
    ///
    /// Categories with no events in range are omitted; the groups are
    /// disjoint, so the entries sum to [`Self::total_in_range`] over the
    /// same range.
    pub async fn breakdown_in_range(
        pool: &PgPool,
        household_id: DbId,
        start: Timestamp,
        end: Timestamp,
    ) -> Result<Vec<CategoryConsumption>, sqlx::Error> {
        sqlx::query_as::<_, CategoryConsumption>(
            "SELECT category, SUM(consumption_in_liters) AS consumption_in_liters
             FROM app.events
             WHERE household_id = $1 AND start_timestamp >= $2 AND start_timestamp < $3
             GROUP BY category
             ORDER BY consumption_in_liters DESC",
        )
        .bind(household_id)
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
    }
}
