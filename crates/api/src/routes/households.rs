//! Route definitions for households and their nested resources.

use axum::routing::{get, patch, post, put};
use axum::Router;

use crate::handlers::{consumption, events, households, invitations, tags};
use crate::state::AppState;

/// Household routes mounted at `/households`.
///
/// ```text
/// GET    /                                      -> list_households
/// POST   /                                      -> create_household
/// GET    /{id}                                  -> get_household
/// PATCH  /{id}                                  -> update_household (admin)
/// DELETE /{id}                                  -> delete_household (admin)
/// GET    /{id}/members                          -> list_members
/// POST   /{id}/leave                            -> leave_household
/// GET    /{id}/invitations                      -> list_invitations (admin)
/// POST   /{id}/invitations                      -> create_invitation (admin)
/// GET    /{id}/tags                             -> list_tags
/// POST   /{id}/tags                             -> create_tag
/// PUT    /{id}/tags/{tag_id}                    -> update_tag (cascades)
/// DELETE /{id}/tags/{tag_id}                    -> delete_tag (cascades)
/// GET    /{id}/events                           -> list_events (cursor)
/// POST   /{id}/events                           -> create_event (ingestion)
/// PATCH  /{id}/events/{event_id}/tag            -> retag_event
/// GET    /{id}/events/leak-count                -> leak_count
/// GET    /{id}/events/unknown-count             -> unknown_count
/// GET    /{id}/consumption                      -> get_consumption
/// GET    /{id}/consumption/buckets              -> get_consumption_buckets
/// GET    /{id}/consumption/current-month        -> get_current_month_consumption
/// GET    /{id}/consumption/current-day          -> get_current_day_consumption
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            get(households::list_households).post(households::create_household),
        )
        .route(
            "/{id}",
            get(households::get_household)
                .patch(households::update_household)
                .delete(households::delete_household),
        )
        .route("/{id}/members", get(households::list_members))
        .route("/{id}/leave", post(households::leave_household))
        .route(
            "/{id}/invitations",
            get(invitations::list_invitations).post(invitations::create_invitation),
        )
        .route("/{id}/tags", get(tags::list_tags).post(tags::create_tag))
        .route(
            "/{id}/tags/{tag_id}",
            put(tags::update_tag).delete(tags::delete_tag),
        )
        .route(
            "/{id}/events",
            get(events::list_events).post(events::create_event),
        )
        .route("/{id}/events/leak-count", get(events::leak_count))
        .route("/{id}/events/unknown-count", get(events::unknown_count))
        .route("/{id}/events/{event_id}/tag", patch(events::retag_event))
        .route("/{id}/consumption", get(consumption::get_consumption))
        .route(
            "/{id}/consumption/buckets",
            get(consumption::get_consumption_buckets),
        )
        .route(
            "/{id}/consumption/current-month",
            get(consumption::get_current_month_consumption),
        )
        .route(
            "/{id}/consumption/current-day",
            get(consumption::get_current_day_consumption),
        )
}
