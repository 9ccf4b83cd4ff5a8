//! Handlers for the current user (`/me`).

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use waterline_db::repositories::HouseholdRepo;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/me/households
///
/// The households the authenticated user belongs to. Same data as
/// `GET /households`; exposed under `/me` for clients that organize
/// around the current user.
pub async fn my_households(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let households = HouseholdRepo::list_for_user(&state.pool, auth.user_id).await?;

    Ok(Json(DataResponse { data: households }))
}
