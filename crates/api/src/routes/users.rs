//! Route definitions for the current user.

use axum::routing::get;
use axum::Router;

use crate::handlers::users;
use crate::state::AppState;

/// Current-user routes mounted at `/me`.
///
/// ```text
/// GET /households  -> my_households
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/households", get(users::my_households))
}
