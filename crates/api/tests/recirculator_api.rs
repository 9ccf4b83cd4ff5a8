//! HTTP-level integration tests for the recirculator routes.
//!
//! The test configuration points the device client at a closed port, so
//! any request that reaches the device fails with a sanitized 500. That
//! makes the validation-ordering property observable: a rejected input
//! must come back as 400, proving no device call was attempted.

mod common;

use axum::http::{Method, StatusCode};
use common::{body_json, get, register_and_login, send_json_auth};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Input validation happens before any device call
// ---------------------------------------------------------------------------

/// setMaxTemperature(40) exceeds the 35 °C bound: rejected with 400, not
/// a device error.
#[sqlx::test(migrations = "../../migrations")]
async fn test_max_temperature_out_of_range_rejected_before_device_call(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(&app, "Ana", "ana@example.com").await;

    for bad_value in [40.0, 19.5, -3.0] {
        let response = send_json_auth(
            &app,
            Method::PUT,
            "/api/v1/recirculator/boiler-1/max-temperature",
            serde_json::json!({ "max_temperature": bad_value }),
            &token,
        )
        .await;

        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "{bad_value} must be rejected by validation, not by the device"
        );
        let json = body_json(response).await;
        assert_eq!(json["code"], "VALIDATION_ERROR");
    }
}

/// An in-range value passes validation and reaches the (unreachable)
/// device, surfacing as a sanitized 500 rather than a validation error.
#[sqlx::test(migrations = "../../migrations")]
async fn test_valid_max_temperature_reaches_the_device(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(&app, "Ana", "ana@example.com").await;

    let response = send_json_auth(
        &app,
        Method::PUT,
        "/api/v1/recirculator/boiler-1/max-temperature",
        serde_json::json!({ "max_temperature": 28.0 }),
        &token,
    )
    .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["code"], "INTERNAL_ERROR");
    assert_eq!(
        json["error"], "An internal error occurred",
        "device failures must not leak upstream details"
    );
}

// ---------------------------------------------------------------------------
// Authentication guard
// ---------------------------------------------------------------------------

/// Every recirculator route requires a session.
#[sqlx::test(migrations = "../../migrations")]
async fn test_recirculator_routes_require_auth(pool: PgPool) {
    let app = common::build_test_app(pool);

    for uri in [
        "/api/v1/recirculator/boiler-1/state",
        "/api/v1/recirculator/boiler-1/last-temperature",
        "/api/v1/recirculator/boiler-1/status",
    ] {
        let response = get(&app, uri).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
