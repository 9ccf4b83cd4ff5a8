//! Household invitation model and status constants.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use waterline_core::types::{DbId, Timestamp};

/// Invitation awaiting a response.
pub const STATUS_PENDING: &str = "pending";
/// Invitation accepted; a membership row was created.
pub const STATUS_ACCEPTED: &str = "accepted";
/// Invitation declined by the invitee.
pub const STATUS_DECLINED: &str = "declined";
/// Invitation not answered before `expires_at`.
pub const STATUS_EXPIRED: &str = "expired";

/// An invitation row from the `app.household_invitations` table.
///
/// The `token` is the opaque secret mailed to the invitee; possession of
/// the token plus a matching account email is what authorizes acceptance.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct HouseholdInvitation {
    pub id: DbId,
    pub household_id: DbId,
    pub invited_email: String,
    pub token: String,
    pub status: String,
    pub expires_at: Timestamp,
    pub invited_by: Option<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating an invitation.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateInvitation {
    pub invited_email: String,
}

/// DTO carrying an invitation token (accept / decline requests).
#[derive(Debug, Clone, Deserialize)]
pub struct InvitationToken {
    pub token: String,
}
