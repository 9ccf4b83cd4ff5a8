//! HTTP-level integration tests for the household invitation flow.

mod common;

use axum::http::StatusCode;
use common::{body_json, create_household, get_auth, post_json_auth, register_and_login};
use sqlx::PgPool;

/// Create an invitation and return (invitation id, token).
async fn invite(
    app: &axum::Router,
    admin_token: &str,
    household_id: i64,
    email: &str,
) -> (i64, String) {
    let response = post_json_auth(
        app,
        &format!("/api/v1/households/{household_id}/invitations"),
        serde_json::json!({ "invited_email": email }),
        admin_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);
    let json = body_json(response).await;
    (
        json["data"]["id"].as_i64().unwrap(),
        json["data"]["token"].as_str().unwrap().to_string(),
    )
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Invitations start pending with a token and an expiry; only admins may
/// create or list them.
#[sqlx::test(migrations = "../../migrations")]
async fn test_create_and_list_invitations(pool: PgPool) {
    let app = common::build_test_app(pool);
    let admin = register_and_login(&app, "Ana", "ana@example.com").await;
    let outsider = register_and_login(&app, "Eve", "eve@example.com").await;
    let household_id = create_household(&app, &admin, "Home", 2).await;

    let (_, token) = invite(&app, &admin, household_id, "bob@example.com").await;
    assert!(!token.is_empty());

    let response = get_auth(
        &app,
        &format!("/api/v1/households/{household_id}/invitations"),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let invitations = json["data"].as_array().unwrap();
    assert_eq!(invitations.len(), 1);
    assert_eq!(invitations[0]["status"], "pending");
    assert_eq!(invitations[0]["invited_email"], "bob@example.com");

    // Outsiders cannot create or list invitations.
    let response = post_json_auth(
        &app,
        &format!("/api/v1/households/{household_id}/invitations"),
        serde_json::json!({ "invited_email": "eve2@example.com" }),
        &outsider,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// Inviting an existing member is rejected.
#[sqlx::test(migrations = "../../migrations")]
async fn test_inviting_a_member_conflicts(pool: PgPool) {
    let app = common::build_test_app(pool);
    let admin = register_and_login(&app, "Ana", "ana@example.com").await;
    let household_id = create_household(&app, &admin, "Home", 2).await;

    let response = post_json_auth(
        &app,
        &format!("/api/v1/households/{household_id}/invitations"),
        serde_json::json!({ "invited_email": "ana@example.com" }),
        &admin,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

// ---------------------------------------------------------------------------
// Acceptance
// ---------------------------------------------------------------------------

/// Accepting marks the invitation and creates the membership atomically.
#[sqlx::test(migrations = "../../migrations")]
async fn test_accept_invitation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let admin = register_and_login(&app, "Ana", "ana@example.com").await;
    let bob = register_and_login(&app, "Bob", "bob@example.com").await;
    let household_id = create_household(&app, &admin, "Home", 2).await;

    let (_, token) = invite(&app, &admin, household_id, "bob@example.com").await;

    let response = post_json_auth(
        &app,
        "/api/v1/invitations/accept",
        serde_json::json!({ "token": token }),
        &bob,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "accepted");

    // Bob now sees the household as a member.
    let response = get_auth(&app, "/api/v1/me/households", &bob).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);

    let response = get_auth(
        &app,
        &format!("/api/v1/households/{household_id}/members"),
        &bob,
    )
    .await;
    let json = body_json(response).await;
    let members = json["data"].as_array().unwrap();
    let bob_entry = members
        .iter()
        .find(|m| m["email"] == "bob@example.com")
        .expect("bob must be listed");
    assert_eq!(bob_entry["role"], "member");
}

/// A token can be used once; a second accept conflicts.
#[sqlx::test(migrations = "../../migrations")]
async fn test_accept_is_single_use(pool: PgPool) {
    let app = common::build_test_app(pool);
    let admin = register_and_login(&app, "Ana", "ana@example.com").await;
    let bob = register_and_login(&app, "Bob", "bob@example.com").await;
    let household_id = create_household(&app, &admin, "Home", 2).await;

    let (_, token) = invite(&app, &admin, household_id, "bob@example.com").await;

    let body = serde_json::json!({ "token": token });
    let response = post_json_auth(&app, "/api/v1/invitations/accept", body.clone(), &bob).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = post_json_auth(&app, "/api/v1/invitations/accept", body, &bob).await;
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

/// Only the invited email may respond to the invitation.
#[sqlx::test(migrations = "../../migrations")]
async fn test_accept_requires_matching_email(pool: PgPool) {
    let app = common::build_test_app(pool);
    let admin = register_and_login(&app, "Ana", "ana@example.com").await;
    let eve = register_and_login(&app, "Eve", "eve@example.com").await;
    let household_id = create_household(&app, &admin, "Home", 2).await;

    let (_, token) = invite(&app, &admin, household_id, "bob@example.com").await;

    let response = post_json_auth(
        &app,
        "/api/v1/invitations/accept",
        serde_json::json!({ "token": token }),
        &eve,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

/// A lapsed invitation is marked expired and cannot be accepted.
#[sqlx::test(migrations = "../../migrations")]
async fn test_expired_invitation_is_rejected(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let admin = register_and_login(&app, "Ana", "ana@example.com").await;
    let bob = register_and_login(&app, "Bob", "bob@example.com").await;
    let household_id = create_household(&app, &admin, "Home", 2).await;

    let (invitation_id, token) = invite(&app, &admin, household_id, "bob@example.com").await;

    // Backdate the expiry.
    sqlx::query("UPDATE app.household_invitations SET expires_at = NOW() - INTERVAL '1 day' WHERE id = $1")
        .bind(invitation_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = post_json_auth(
        &app,
        "/api/v1/invitations/accept",
        serde_json::json!({ "token": token }),
        &bob,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let status: String =
        sqlx::query_scalar("SELECT status FROM app.household_invitations WHERE id = $1")
            .bind(invitation_id)
            .fetch_one(&pool)
            .await
            .unwrap();
    assert_eq!(status, "expired");

    // No membership was created.
    let response = get_auth(&app, "/api/v1/me/households", &bob).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}

// ---------------------------------------------------------------------------
// Declining
// ---------------------------------------------------------------------------

/// Declining records the status and creates no membership.
#[sqlx::test(migrations = "../../migrations")]
async fn test_decline_invitation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let admin = register_and_login(&app, "Ana", "ana@example.com").await;
    let bob = register_and_login(&app, "Bob", "bob@example.com").await;
    let household_id = create_household(&app, &admin, "Home", 2).await;

    let (_, token) = invite(&app, &admin, household_id, "bob@example.com").await;

    let response = post_json_auth(
        &app,
        "/api/v1/invitations/decline",
        serde_json::json!({ "token": token }),
        &bob,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["status"], "declined");

    let response = get_auth(&app, "/api/v1/me/households", &bob).await;
    let json = body_json(response).await;
    assert!(json["data"].as_array().unwrap().is_empty());
}
