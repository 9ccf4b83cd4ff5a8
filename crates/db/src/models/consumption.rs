//! Consumption aggregate types.
//!
//! Consumption records are computed on demand from event aggregates and
//! never persisted.

use serde::Serialize;
use sqlx::FromRow;
use waterline_core::types::Timestamp;

/// Liters consumed by one fixture category within a queried range.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CategoryConsumption {
    pub category: String,
    pub consumption_in_liters: f64,
}

/// Aggregated consumption for one time range.
///
/// `percent_deviation_from_baseline` compares the range against the
/// equal-length window immediately preceding it, floored at -100; a
/// zero baseline yields 0.
#[derive(Debug, Clone, Serialize)]
pub struct Consumption {
    pub start_date: Timestamp,
    pub end_date: Timestamp,
    pub consumption_in_liters: f64,
    pub consumption_in_liters_per_day_per_person: f64,
    pub percent_deviation_from_baseline: f64,
    pub category_breakdown: Vec<CategoryConsumption>,
}
