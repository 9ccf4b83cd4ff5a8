pub mod auth;
pub mod categories;
pub mod health;
pub mod households;
pub mod invitations;
pub mod recirculator;
pub mod users;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
///
/// /me/households                                   current user's households
///
/// /households                                      list, create
/// /households/{id}                                 get, update, delete
/// /households/{id}/members                         list members
/// /households/{id}/leave                           leave (POST)
/// /households/{id}/invitations                     list, create (admin)
/// /households/{id}/tags                            list, create
/// /households/{id}/tags/{tag_id}                   update, delete (cascades to events)
/// /households/{id}/events                          list (cursor), ingest
/// /households/{id}/events/{event_id}/tag           re-categorize (PATCH)
/// /households/{id}/events/leak-count               leak counter (GET)
/// /households/{id}/events/unknown-count            unclassified counter (GET)
/// /households/{id}/consumption                     range aggregate (GET)
/// /households/{id}/consumption/buckets             bucketed aggregate (GET)
/// /households/{id}/consumption/current-month       month-to-date (GET)
/// /households/{id}/consumption/current-day         day-to-date (GET)
///
/// /invitations/accept                              accept by token (POST)
/// /invitations/decline                             decline by token (POST)
///
/// /recirculator/{device_id}/state                  power state (GET)
/// /recirculator/{device_id}/turn-on                switch on (POST)
/// /recirculator/{device_id}/turn-off               switch off (POST)
/// /recirculator/{device_id}/max-temperature        set target (PUT)
/// /recirculator/{device_id}/last-temperature       last reading (GET)
/// /recirculator/{device_id}/status                 full status (GET)
///
/// /categories                                      fixture reference data (GET)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (register, login, refresh, logout).
        .nest("/auth", auth::router())
        // Current-user routes.
        .nest("/me", users::router())
        // Households and their nested resources (tags, events, consumption).
        .nest("/households", households::router())
        // Token-addressed invitation responses.
        .nest("/invitations", invitations::router())
        // Recirculator device control.
        .nest("/recirculator", recirculator::router())
        // Static fixture-category reference data.
        .nest("/categories", categories::router())
}
