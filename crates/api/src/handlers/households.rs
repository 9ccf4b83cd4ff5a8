//! Handlers for the `/households` resource.
//!
//! Household creation atomically seeds the creator as the first admin
//! member. Updates and deletion require the admin role; deletion
//! cascades to memberships, tags, invitations, and events via foreign
//! keys.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use waterline_core::error::CoreError;
use waterline_core::roles::ROLE_ADMIN;
use waterline_core::sensor::is_valid_sensor_id;
use waterline_core::types::DbId;
use waterline_db::models::household::{CreateHousehold, UpdateHousehold};
use waterline_db::repositories::{HouseholdRepo, HouseholdUserRepo};
use waterline_db::unit_of_work;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::membership::{require_admin, require_member};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/households
///
/// List the households the authenticated user belongs to.
pub async fn list_households(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let households = HouseholdRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse { data: households }))
}

/// POST /api/v1/households
///
/// Create a household and make the caller its first admin member.
/// Both writes happen in one transaction.
pub async fn create_household(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreateHousehold>,
) -> AppResult<impl IntoResponse> {
    validate_name(&input.name)?;
    validate_residents(input.residents)?;
    validate_sensor_id(&input.sensor_id)?;

    let user_id = auth.user_id;
    let household = unit_of_work::execute(&state.pool, |tx| {
        Box::pin(async move {
            let household = HouseholdRepo::create_in_tx(tx, &input).await?;
            HouseholdUserRepo::add_in_tx(tx, household.id, user_id, ROLE_ADMIN).await?;
            Ok::<_, AppError>(household)
        })
    })
    .await?;

    tracing::info!(household_id = household.id, user_id, "Household created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: household })))
}

/// GET /api/v1/households/{id}
///
/// Fetch one household. Requires membership.
pub async fn get_household(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_member(&state.pool, household_id, auth.user_id).await?;

    let household = HouseholdRepo::find_by_id(&state.pool, household_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Household",
            id: household_id,
        }))?;

    Ok(Json(DataResponse { data: household }))
}

/// PATCH /api/v1/households/{id}
///
/// Partially update a household. Admin only.
pub async fn update_household(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
    Json(input): Json<UpdateHousehold>,
) -> AppResult<impl IntoResponse> {
    require_admin(&state.pool, household_id, auth.user_id).await?;

    if let Some(name) = &input.name {
        validate_name(name)?;
    }
    if let Some(residents) = input.residents {
        validate_residents(residents)?;
    }
    if let Some(sensor_id) = &input.sensor_id {
        validate_sensor_id(sensor_id)?;
    }

    let household = HouseholdRepo::update(&state.pool, household_id, &input)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Household",
            id: household_id,
        }))?;

    tracing::info!(household_id, user_id = auth.user_id, "Household updated");

    Ok(Json(DataResponse { data: household }))
}

/// DELETE /api/v1/households/{id}
///
/// Delete a household and everything it owns. Admin only.
pub async fn delete_household(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_admin(&state.pool, household_id, auth.user_id).await?;

    let deleted = HouseholdRepo::delete(&state.pool, household_id).await?;
    if !deleted {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Household",
            id: household_id,
        }));
    }

    tracing::info!(household_id, user_id = auth.user_id, "Household deleted");

    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/households/{id}/members
///
/// List household members with their roles. Requires membership.
pub async fn list_members(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_member(&state.pool, household_id, auth.user_id).await?;

    let members = HouseholdUserRepo::list_members(&state.pool, household_id).await?;

    Ok(Json(DataResponse { data: members }))
}

/// POST /api/v1/households/{id}/leave
///
/// Remove the caller's own membership. The last admin cannot leave: a
/// household must always keep at least one admin, so the admin either
/// deletes the household or promotes someone first.
pub async fn leave_household(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let membership = require_member(&state.pool, household_id, auth.user_id).await?;

    if membership.role == ROLE_ADMIN {
        let admins = HouseholdUserRepo::count_admins(&state.pool, household_id).await?;
        if admins <= 1 {
            return Err(AppError::Core(CoreError::Conflict(
                "Cannot leave: a household must keep at least one admin".into(),
            )));
        }
    }

    HouseholdUserRepo::remove(&state.pool, household_id, auth.user_id).await?;

    tracing::info!(
        household_id,
        user_id = auth.user_id,
        role = %membership.role,
        "User left household",
    );

    Ok(StatusCode::NO_CONTENT)
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "name must not be empty".into(),
        )));
    }
    Ok(())
}

fn validate_residents(residents: i32) -> AppResult<()> {
    if residents < 1 {
        return Err(AppError::Core(CoreError::Validation(
            "residents must be at least 1".into(),
        )));
    }
    Ok(())
}

fn validate_sensor_id(sensor_id: &str) -> AppResult<()> {
    if !is_valid_sensor_id(sensor_id) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "'{sensor_id}' is not a valid sensor id (expected 12 hex digits)"
        ))));
    }
    Ok(())
}
