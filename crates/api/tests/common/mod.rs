//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the full application router with the production middleware
//! stack (CORS, request ID, timeout, tracing, panic recovery) and
//! provides request/response helpers on top of `tower::ServiceExt`.

#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use sqlx::PgPool;
use tower::ServiceExt;
use waterline_device::{DeviceConfig, RecirculatorApi};

use waterline_api::auth::jwt::JwtConfig;
use waterline_api::config::ServerConfig;
use waterline_api::router::build_app_router;
use waterline_api::state::AppState;

/// Build a test `ServerConfig` with safe defaults.
///
/// The device-control base URL points at a closed local port with a
/// one-second timeout: any handler that incorrectly reaches the device
/// fails fast instead of hanging the test.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-long-enough-for-hmac".to_string(),
            access_token_expiry_mins: 15,
            refresh_token_expiry_days: 7,
        },
        device: DeviceConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            request_timeout_secs: 1,
        },
    }
}

/// Build the full application router with all middleware layers, using
/// the given database pool. Mirrors the router construction in `main.rs`.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let recirculator = Arc::new(RecirculatorApi::new(&config.device));

    let state = AppState {
        pool,
        config: Arc::new(config.clone()),
        recirculator,
    };

    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

/// Send a GET request without authentication.
pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send a GET request with a Bearer token.
pub async fn get_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send an unauthenticated JSON request with the given method.
pub async fn send_json(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send an authenticated JSON request with the given method.
pub async fn send_json_auth(
    app: &Router,
    method: Method,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Send an unauthenticated POST request with a JSON body.
pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send_json(app, Method::POST, uri, body).await
}

/// Send an authenticated POST request with a JSON body.
pub async fn post_json_auth(
    app: &Router,
    uri: &str,
    body: serde_json::Value,
    token: &str,
) -> Response<Body> {
    send_json_auth(app, Method::POST, uri, body, token).await
}

/// Send an authenticated DELETE request.
pub async fn delete_auth(app: &Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header("Authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Account helpers
// ---------------------------------------------------------------------------

/// Register a fresh account via the API and return its access token.
pub async fn register_and_login(app: &Router, name: &str, email: &str) -> String {
    let body = serde_json::json!({
        "name": name,
        "email": email,
        "password": "correct-horse-battery-staple",
    });
    let response = post_json(app, "/api/v1/auth/register", body).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["access_token"]
        .as_str()
        .expect("register response must contain access_token")
        .to_string()
}

/// Create a household via the API and return its id.
pub async fn create_household(app: &Router, token: &str, name: &str, residents: i32) -> i64 {
    let body = serde_json::json!({
        "name": name,
        "residents": residents,
        "sensor_id": "a1b2c3d4e5f6",
    });
    let response = post_json_auth(app, "/api/v1/households", body, token).await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    json["data"]["id"].as_i64().expect("household id")
}
