//! HTTP-level integration tests for household CRUD, membership
//! authorization, and the leave/last-admin rule.

mod common;

use axum::http::{Method, StatusCode};
use common::{
    body_json, create_household, delete_auth, get_auth, post_json_auth, register_and_login,
    send_json_auth,
};
use sqlx::PgPool;

// ---------------------------------------------------------------------------
// Creation and validation
// ---------------------------------------------------------------------------

/// Creating a household makes the caller its first admin member.
#[sqlx::test(migrations = "../../migrations")]
async fn test_create_household_seeds_admin(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(&app, "Ana", "ana@example.com").await;

    let household_id = create_household(&app, &token, "Home", 4).await;

    let response = get_auth(
        &app,
        &format!("/api/v1/households/{household_id}/members"),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let members = json["data"].as_array().unwrap();
    assert_eq!(members.len(), 1);
    assert_eq!(members[0]["email"], "ana@example.com");
    assert_eq!(members[0]["role"], "admin");
}

/// Bad sensor ids and resident counts are rejected with 400.
#[sqlx::test(migrations = "../../migrations")]
async fn test_create_household_validation(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(&app, "Ana", "ana@example.com").await;

    let bad_sensor = serde_json::json!({
        "name": "Home",
        "residents": 2,
        "sensor_id": "not-a-sensor",
    });
    let response = post_json_auth(&app, "/api/v1/households", bad_sensor, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let zero_residents = serde_json::json!({
        "name": "Home",
        "residents": 0,
        "sensor_id": "a1b2c3d4e5f6",
    });
    let response = post_json_auth(&app, "/api/v1/households", zero_residents, &token).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ---------------------------------------------------------------------------
// Membership authorization
// ---------------------------------------------------------------------------

/// Non-members get 403 for an existing household, 404 for a missing one.
#[sqlx::test(migrations = "../../migrations")]
async fn test_membership_is_enforced(pool: PgPool) {
    let app = common::build_test_app(pool);
    let owner = register_and_login(&app, "Ana", "ana@example.com").await;
    let stranger = register_and_login(&app, "Bob", "bob@example.com").await;

    let household_id = create_household(&app, &owner, "Home", 2).await;

    let response = get_auth(
        &app,
        &format!("/api/v1/households/{household_id}"),
        &stranger,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = get_auth(&app, "/api/v1/households/999999", &stranger).await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

/// Plain members cannot update or delete the household.
#[sqlx::test(migrations = "../../migrations")]
async fn test_admin_role_is_required_for_mutations(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let owner = register_and_login(&app, "Ana", "ana@example.com").await;
    let member_token = register_and_login(&app, "Bob", "bob@example.com").await;

    let household_id = create_household(&app, &owner, "Home", 2).await;

    // Promote Bob to plain member directly in the database.
    let bob_id: i64 = sqlx::query_scalar("SELECT id FROM auth.users WHERE email = $1")
        .bind("bob@example.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO app.household_users (household_id, user_id, role) VALUES ($1, $2, 'member')")
        .bind(household_id)
        .bind(bob_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = send_json_auth(
        &app,
        Method::PATCH,
        &format!("/api/v1/households/{household_id}"),
        serde_json::json!({ "name": "Bob's now" }),
        &member_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    let response = delete_auth(
        &app,
        &format!("/api/v1/households/{household_id}"),
        &member_token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

// ---------------------------------------------------------------------------
// Update and delete
// ---------------------------------------------------------------------------

/// PATCH applies only the provided fields.
#[sqlx::test(migrations = "../../migrations")]
async fn test_partial_update(pool: PgPool) {
    let app = common::build_test_app(pool);
    let token = register_and_login(&app, "Ana", "ana@example.com").await;
    let household_id = create_household(&app, &token, "Home", 4).await;

    let response = send_json_auth(
        &app,
        Method::PATCH,
        &format!("/api/v1/households/{household_id}"),
        serde_json::json!({ "residents": 5 }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["data"]["residents"], 5);
    assert_eq!(json["data"]["name"], "Home", "untouched fields must survive");
    assert_eq!(json["data"]["sensor_id"], "a1b2c3d4e5f6");
}

/// Deleting a household removes everything it owns.
#[sqlx::test(migrations = "../../migrations")]
async fn test_delete_cascades(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let token = register_and_login(&app, "Ana", "ana@example.com").await;
    let household_id = create_household(&app, &token, "Home", 2).await;

    // Seed a tag, an invitation, and an event through the API.
    let response = post_json_auth(
        &app,
        &format!("/api/v1/households/{household_id}/tags"),
        serde_json::json!({ "category": "washer", "name": "eco" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        &app,
        &format!("/api/v1/households/{household_id}/invitations"),
        serde_json::json!({ "invited_email": "bob@example.com" }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = post_json_auth(
        &app,
        &format!("/api/v1/households/{household_id}/events"),
        serde_json::json!({
            "category": "washer",
            "tag_name": "eco",
            "start_timestamp": "2025-06-01T10:00:00Z",
            "end_timestamp": "2025-06-01T10:30:00Z",
            "duration_in_seconds": 1800,
            "consumption_in_liters": 55.0,
        }),
        &token,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = delete_auth(&app, &format!("/api/v1/households/{household_id}"), &token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    for table in [
        "app.household_users",
        "app.tags",
        "app.household_invitations",
        "app.events",
    ] {
        let count: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table} WHERE household_id = $1"))
                .bind(household_id)
                .fetch_one(&pool)
                .await
                .unwrap();
        assert_eq!(count, 0, "{table} must be empty after cascade delete");
    }
}

// ---------------------------------------------------------------------------
// Leaving
// ---------------------------------------------------------------------------

/// The last admin cannot leave; a second admin can.
#[sqlx::test(migrations = "../../migrations")]
async fn test_last_admin_cannot_leave(pool: PgPool) {
    let app = common::build_test_app(pool.clone());
    let owner = register_and_login(&app, "Ana", "ana@example.com").await;
    let household_id = create_household(&app, &owner, "Home", 2).await;

    let response = post_json_auth(
        &app,
        &format!("/api/v1/households/{household_id}/leave"),
        serde_json::json!({}),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::CONFLICT);

    // Add a second admin directly; now the first admin may leave.
    let second = register_and_login(&app, "Bob", "bob@example.com").await;
    let bob_id: i64 = sqlx::query_scalar("SELECT id FROM auth.users WHERE email = $1")
        .bind("bob@example.com")
        .fetch_one(&pool)
        .await
        .unwrap();
    sqlx::query("INSERT INTO app.household_users (household_id, user_id, role) VALUES ($1, $2, 'admin')")
        .bind(household_id)
        .bind(bob_id)
        .execute(&pool)
        .await
        .unwrap();

    let response = post_json_auth(
        &app,
        &format!("/api/v1/households/{household_id}/leave"),
        serde_json::json!({}),
        &owner,
    )
    .await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The remaining admin still sees the household.
    let response = get_auth(&app, "/api/v1/me/households", &second).await;
    let json = body_json(response).await;
    assert_eq!(json["data"].as_array().unwrap().len(), 1);
}
