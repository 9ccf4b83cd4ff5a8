//! Handlers for household invitations.
//!
//! An admin invites an email address; the backend stores a pending
//! invitation with an opaque token and an expiry (delivery of the token
//! is the mail system's job). The invitee accepts or declines with the
//! token while logged in to an account whose email matches. Acceptance
//! atomically records the status transition and creates the membership.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use uuid::Uuid;
use waterline_core::email::is_valid_email;
use waterline_core::error::CoreError;
use waterline_core::roles::ROLE_MEMBER;
use waterline_core::types::DbId;
use waterline_db::models::invitation::{
    CreateInvitation, HouseholdInvitation, InvitationToken, STATUS_ACCEPTED, STATUS_DECLINED,
    STATUS_EXPIRED, STATUS_PENDING,
};
use waterline_db::repositories::{HouseholdUserRepo, InvitationRepo, UserRepo};
use waterline_db::unit_of_work;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::membership::require_admin;
use crate::response::DataResponse;
use crate::state::AppState;

/// Days until a pending invitation expires.
const INVITATION_TTL_DAYS: i64 = 7;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/households/{id}/invitations
///
/// Invite an email address to the household. Admin only.
pub async fn create_invitation(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
    Json(input): Json<CreateInvitation>,
) -> AppResult<impl IntoResponse> {
    require_admin(&state.pool, household_id, auth.user_id).await?;

    if !is_valid_email(&input.invited_email) {
        return Err(AppError::Core(CoreError::Validation(format!(
            "'{}' is not a valid email address",
            input.invited_email
        ))));
    }

    // Inviting someone who is already a member is a no-op waiting to
    // happen; reject it up front.
    if let Some(user) = UserRepo::find_by_email(&state.pool, &input.invited_email).await? {
        if HouseholdUserRepo::find(&state.pool, household_id, user.id)
            .await?
            .is_some()
        {
            return Err(AppError::Core(CoreError::Conflict(
                "This user is already a member of the household".into(),
            )));
        }
    }

    let token = Uuid::new_v4().to_string();
    let expires_at = Utc::now() + chrono::Duration::days(INVITATION_TTL_DAYS);

    let invitation = InvitationRepo::create(
        &state.pool,
        household_id,
        &input.invited_email,
        &token,
        expires_at,
        auth.user_id,
    )
    .await?;

    tracing::info!(
        household_id,
        invitation_id = invitation.id,
        user_id = auth.user_id,
        "Invitation created",
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: invitation })))
}

/// GET /api/v1/households/{id}/invitations
///
/// List a household's invitations. Admin only.
pub async fn list_invitations(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(household_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    require_admin(&state.pool, household_id, auth.user_id).await?;

    let invitations = InvitationRepo::list_for_household(&state.pool, household_id).await?;

    Ok(Json(DataResponse { data: invitations }))
}

/// POST /api/v1/invitations/accept
///
/// Accept a pending invitation by token. The caller's account email must
/// match the invited address. Status transition and membership insert
/// happen in one transaction.
pub async fn accept_invitation(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<InvitationToken>,
) -> AppResult<impl IntoResponse> {
    let invitation = load_pending_invitation(&state, &input.token, auth.user_id).await?;

    let user_id = auth.user_id;
    let invitation_id = invitation.id;
    let household_id = invitation.household_id;
    let accepted = unit_of_work::execute(&state.pool, |tx| {
        Box::pin(async move {
            let updated = InvitationRepo::set_status_in_tx(tx, invitation_id, STATUS_ACCEPTED)
                .await?
                .ok_or(AppError::Core(CoreError::NotFound {
                    entity: "HouseholdInvitation",
                    id: invitation_id,
                }))?;
            HouseholdUserRepo::add_in_tx(tx, household_id, user_id, ROLE_MEMBER).await?;
            Ok::<_, AppError>(updated)
        })
    })
    .await?;

    tracing::info!(
        household_id,
        invitation_id,
        user_id,
        "Invitation accepted",
    );

    Ok(Json(DataResponse { data: accepted }))
}

/// POST /api/v1/invitations/decline
///
/// Decline a pending invitation by token.
pub async fn decline_invitation(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<InvitationToken>,
) -> AppResult<impl IntoResponse> {
    let invitation = load_pending_invitation(&state, &input.token, auth.user_id).await?;

    let declined = InvitationRepo::set_status(&state.pool, invitation.id, STATUS_DECLINED)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "HouseholdInvitation",
            id: invitation.id,
        }))?;

    tracing::info!(
        household_id = invitation.household_id,
        invitation_id = invitation.id,
        user_id = auth.user_id,
        "Invitation declined",
    );

    Ok(Json(DataResponse { data: declined }))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load an invitation by token and verify it is actionable by this user:
/// still pending, not past its expiry, and addressed to the caller's
/// account email. A lapsed invitation is marked expired on the way out.
async fn load_pending_invitation(
    state: &AppState,
    token: &str,
    user_id: DbId,
) -> AppResult<HouseholdInvitation> {
    let invitation = InvitationRepo::find_by_token(&state.pool, token)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Validation("Unknown invitation token".into()))
        })?;

    if invitation.status != STATUS_PENDING {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Invitation was already {}",
            invitation.status
        ))));
    }

    if invitation.expires_at <= Utc::now() {
        InvitationRepo::set_status(&state.pool, invitation.id, STATUS_EXPIRED).await?;
        return Err(AppError::Core(CoreError::Conflict(
            "Invitation has expired".into(),
        )));
    }

    let user = UserRepo::find_by_id(&state.pool, user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if !user.email.eq_ignore_ascii_case(&invitation.invited_email) {
        return Err(AppError::Core(CoreError::Forbidden(
            "This invitation was issued to a different email address".into(),
        )));
    }

    Ok(invitation)
}
