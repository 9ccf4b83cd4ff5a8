//! Handlers for consumption analytics.
//!
//! A consumption record is computed on demand: total liters over a
//! half-open range, the same total normalized per day per resident, the
//! percent deviation against the equal-length window immediately
//! preceding the range, and a per-category breakdown. The bucketed
//! variant repeats the computation per granularity bucket.

use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{Datelike, TimeZone, Utc};
use waterline_core::consumption::{
    bucket_ranges, liters_per_day_per_person, percent_deviation,
};
use waterline_core::error::CoreError;
use waterline_core::types::{DbId, Timestamp};
use waterline_db::models::consumption::Consumption;
use waterline_db::models::household::Household;
use waterline_db::repositories::{ConsumptionRepo, HouseholdRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::membership::require_member;
use crate::query::{BucketParams, RangeParams};
use crate::response::DataResponse;
use crate::state::AppState;

/// Upper bound on buckets per request. A year of hourly buckets is 8760;
/// anything past this is almost certainly a client bug and would fan out
/// into thousands of aggregate queries.
const MAX_BUCKETS: usize = 1000;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/households/{id}/consumption?start=&end=
///
/// Aggregated consumption for an arbitrary range.
pub async fn get_consumption(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
    Query(params): Query<RangeParams>,
) -> AppResult<impl IntoResponse> {
    require_member(&state.pool, household_id, auth.user_id).await?;
    let household = load_household(&state, household_id).await?;
    validate_range(params.start, params.end)?;

    let consumption =
        compute_consumption(&state, &household, params.start, params.end).await?;

    Ok(Json(DataResponse { data: consumption }))
}

/// GET /api/v1/households/{id}/consumption/buckets?start=&end=&granularity=
///
/// Consumption per granularity bucket, in ascending time order. Buckets
/// are non-overlapping and contiguous; their totals sum to the
/// whole-range total. Empty buckets report zero consumption and zero
/// deviation.
pub async fn get_consumption_buckets(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
    Query(params): Query<BucketParams>,
) -> AppResult<impl IntoResponse> {
    require_member(&state.pool, household_id, auth.user_id).await?;
    let household = load_household(&state, household_id).await?;
    validate_range(params.start, params.end)?;

    let ranges = bucket_ranges(params.start, params.end, params.granularity);
    if ranges.len() > MAX_BUCKETS {
        return Err(AppError::BadRequest(format!(
            "Range yields {} {} buckets; the maximum is {MAX_BUCKETS}",
            ranges.len(),
            params.granularity,
        )));
    }

    let mut buckets = Vec::with_capacity(ranges.len());
    for (bucket_start, bucket_end) in ranges {
        buckets.push(compute_consumption(&state, &household, bucket_start, bucket_end).await?);
    }

    Ok(Json(DataResponse { data: buckets }))
}

/// GET /api/v1/households/{id}/consumption/current-month
///
/// Consumption from the first of the current month until now.
pub async fn get_current_month_consumption(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_member(&state.pool, household_id, auth.user_id).await?;
    let household = load_household(&state, household_id).await?;

    let now = Utc::now();
    let month_start = Utc
        .with_ymd_and_hms(now.year(), now.month(), 1, 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::InternalError("Failed to compute month start".into()))?;

    let consumption = compute_consumption(&state, &household, month_start, now).await?;

    Ok(Json(DataResponse { data: consumption }))
}

/// GET /api/v1/households/{id}/consumption/current-day
///
/// Consumption from UTC midnight until now.
pub async fn get_current_day_consumption(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_member(&state.pool, household_id, auth.user_id).await?;
    let household = load_household(&state, household_id).await?;

    let now = Utc::now();
    let day_start = Utc
        .with_ymd_and_hms(now.year(), now.month(), now.day(), 0, 0, 0)
        .single()
        .ok_or_else(|| AppError::InternalError("Failed to compute day start".into()))?;

    let consumption = compute_consumption(&state, &household, day_start, now).await?;

    Ok(Json(DataResponse { data: consumption }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build one consumption record for `[start, end)`.
///
/// The baseline is the equal-length window ending where the range
/// begins; an empty baseline yields 0% deviation.
async fn compute_consumption(
    state: &AppState,
    household: &Household,
    start: Timestamp,
    end: Timestamp,
) -> AppResult<Consumption> {
    let total = ConsumptionRepo::total_in_range(&state.pool, household.id, start, end).await?;
    let breakdown =
        ConsumptionRepo::breakdown_in_range(&state.pool, household.id, start, end).await?;

    let baseline_start = start - (end - start);
    let baseline =
        ConsumptionRepo::total_in_range(&state.pool, household.id, baseline_start, start).await?;

    Ok(Consumption {
        start_date: start,
        end_date: end,
        consumption_in_liters: total,
        consumption_in_liters_per_day_per_person: liters_per_day_per_person(
            total,
            start,
            end,
            household.residents,
        ),
        percent_deviation_from_baseline: percent_deviation(total, baseline),
        category_breakdown: breakdown,
    })
}

async fn load_household(state: &AppState, household_id: DbId) -> AppResult<Household> {
    HouseholdRepo::find_by_id(&state.pool, household_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Household",
            id: household_id,
        }))
}

fn validate_range(start: Timestamp, end: Timestamp) -> AppResult<()> {
    if end <= start {
        return Err(AppError::Core(CoreError::Validation(
            "end must be after start".into(),
        )));
    }
    Ok(())
}
