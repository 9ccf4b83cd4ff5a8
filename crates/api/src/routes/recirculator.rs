//! Route definitions for recirculator device control.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::recirculator;
use crate::state::AppState;

/// Recirculator routes mounted at `/recirculator`.
///
/// ```text
/// GET  /{device_id}/state             -> get_state
/// POST /{device_id}/turn-on           -> turn_on
/// POST /{device_id}/turn-off          -> turn_off
/// PUT  /{device_id}/max-temperature   -> set_max_temperature
/// GET  /{device_id}/last-temperature  -> get_last_temperature
/// GET  /{device_id}/status            -> get_status
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{device_id}/state", get(recirculator::get_state))
        .route("/{device_id}/turn-on", post(recirculator::turn_on))
        .route("/{device_id}/turn-off", post(recirculator::turn_off))
        .route(
            "/{device_id}/max-temperature",
            put(recirculator::set_max_temperature),
        )
        .route(
            "/{device_id}/last-temperature",
            get(recirculator::get_last_temperature),
        )
        .route("/{device_id}/status", get(recirculator::get_status))
}
