//! Route definitions for token-addressed invitation responses.
//!
//! Creation and listing live under the owning household
//! (see [`households`](super::households)); accept/decline are mounted
//! separately because the invitee addresses them by token, not by
//! household.

use axum::routing::post;
use axum::Router;

use crate::handlers::invitations;
use crate::state::AppState;

/// Invitation-response routes mounted at `/invitations`.
///
/// ```text
/// POST /accept   -> accept_invitation
/// POST /decline  -> decline_invitation
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/accept", post(invitations::accept_invitation))
        .route("/decline", post(invitations::decline_invitation))
}
