//! Repository for the `app.household_invitations` table.

use sqlx::PgPool;
use waterline_core::types::{DbId, Timestamp};

use crate::models::invitation::HouseholdInvitation;

const COLUMNS: &str = "id, household_id, invited_email, token, status, expires_at, invited_by, \
     created_at, updated_at";

/// Provides CRUD operations for household invitations.
pub struct InvitationRepo;

impl InvitationRepo {
    /// Insert a new pending invitation.
    pub async fn create(
        pool: &PgPool,
        household_id: DbId,
        invited_email: &str,
        token: &str,
        expires_at: Timestamp,
        invited_by: DbId,
    ) -> Result<HouseholdInvitation, sqlx::Error> {
        let query = format!(
            "INSERT INTO app.household_invitations
                 (household_id, invited_email, token, expires_at, invited_by)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HouseholdInvitation>(&query)
            .bind(household_id)
            .bind(invited_email)
            .bind(token)
            .bind(expires_at)
            .bind(invited_by)
            .fetch_one(pool)
            .await
    }

    /// Find an invitation by its token.
    pub async fn find_by_token(
        pool: &PgPool,
        token: &str,
    ) -> Result<Option<HouseholdInvitation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM app.household_invitations WHERE token = $1");
        sqlx::query_as::<_, HouseholdInvitation>(&query)
            .bind(token)
            .fetch_optional(pool)
            .await
    }

    /// List all invitations for a household, most recent first.
    pub async fn list_for_household(
        pool: &PgPool,
        household_id: DbId,
    ) -> Result<Vec<HouseholdInvitation>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM app.household_invitations
             WHERE household_id = $1
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, HouseholdInvitation>(&query)
            .bind(household_id)
            .fetch_all(pool)
            .await
    }

    /// Transition an invitation's status.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<HouseholdInvitation>, sqlx::Error> {
        let query = format!(
            "UPDATE app.household_invitations
             SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HouseholdInvitation>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }

    /// Transition an invitation's status within an existing transaction.
    ///
    /// Used by invitation acceptance, which atomically records the status
    /// and inserts the membership row.
    pub async fn set_status_in_tx(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        id: DbId,
        status: &str,
    ) -> Result<Option<HouseholdInvitation>, sqlx::Error> {
        let query = format!(
            "UPDATE app.household_invitations
             SET status = $2, updated_at = NOW()
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, HouseholdInvitation>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(&mut **tx)
            .await
    }
}
