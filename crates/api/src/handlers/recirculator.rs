//! Handlers for recirculator device control.
//!
//! Thin orchestration over the external device-control service: each
//! handler forwards to [`RecirculatorApi`] and shapes the result into
//! the typed payloads. Input bounds (target temperature in [20, 35] °C)
//! are enforced here, before any device call is attempted.

use axum::extract::{Path, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use waterline_core::error::CoreError;
use waterline_device::types::validate_max_temperature;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

/// Request body for `PUT /recirculator/{device_id}/max-temperature`.
#[derive(Debug, Deserialize)]
pub struct SetMaxTemperatureRequest {
    pub max_temperature: f64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/recirculator/{device_id}/state
///
/// Current power state of the recirculation pump.
pub async fn get_state(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_device_id(&device_id)?;

    let power_state = state.recirculator.get_state(&device_id).await?;

    Ok(Json(DataResponse { data: power_state }))
}

/// POST /api/v1/recirculator/{device_id}/turn-on
pub async fn turn_on(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_device_id(&device_id)?;

    let power_state = state.recirculator.turn_on(&device_id).await?;

    tracing::info!(device_id = %device_id, user_id = auth.user_id, "Recirculator turned on");

    Ok(Json(DataResponse { data: power_state }))
}

/// POST /api/v1/recirculator/{device_id}/turn-off
pub async fn turn_off(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_device_id(&device_id)?;

    let power_state = state.recirculator.turn_off(&device_id).await?;

    tracing::info!(device_id = %device_id, user_id = auth.user_id, "Recirculator turned off");

    Ok(Json(DataResponse { data: power_state }))
}

/// PUT /api/v1/recirculator/{device_id}/max-temperature
///
/// Set the recirculation target temperature. Values outside [20, 35] °C
/// are rejected with a validation error before the device is contacted.
pub async fn set_max_temperature(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(device_id): Path<String>,
    Json(input): Json<SetMaxTemperatureRequest>,
) -> AppResult<impl IntoResponse> {
    validate_device_id(&device_id)?;
    validate_max_temperature(input.max_temperature)
        .map_err(|msg| AppError::Core(CoreError::Validation(msg)))?;

    state
        .recirculator
        .set_max_temperature(&device_id, input.max_temperature)
        .await?;

    tracing::info!(
        device_id = %device_id,
        max_temperature = input.max_temperature,
        user_id = auth.user_id,
        "Recirculator max temperature set",
    );

    Ok(Json(DataResponse {
        data: input.max_temperature,
    }))
}

/// GET /api/v1/recirculator/{device_id}/last-temperature
///
/// Most recent temperature measurement reported by the device.
pub async fn get_last_temperature(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_device_id(&device_id)?;

    let reading = state.recirculator.get_last_temperature(&device_id).await?;

    Ok(Json(DataResponse { data: reading }))
}

/// GET /api/v1/recirculator/{device_id}/status
///
/// Full device status snapshot (power, target, last reading, liveness).
pub async fn get_status(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(device_id): Path<String>,
) -> AppResult<impl IntoResponse> {
    validate_device_id(&device_id)?;

    let status = state.recirculator.get_status(&device_id).await?;

    Ok(Json(DataResponse { data: status }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn validate_device_id(device_id: &str) -> AppResult<()> {
    if device_id.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "device id must not be empty".into(),
        )));
    }
    Ok(())
}
