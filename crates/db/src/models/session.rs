//! Refresh-token session model.

use sqlx::FromRow;
use waterline_core::types::{DbId, Timestamp};

/// A session row from the `auth.sessions` table.
///
/// Stores only the SHA-256 hash of the refresh token. A session is
/// active while `revoked_at` is null and `expires_at` is in the future.
#[derive(Debug, Clone, FromRow)]
pub struct Session {
    pub id: DbId,
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
    pub revoked_at: Option<Timestamp>,
    pub created_at: Timestamp,
}

/// DTO for creating a session row.
#[derive(Debug, Clone)]
pub struct CreateSession {
    pub user_id: DbId,
    pub refresh_token_hash: String,
    pub expires_at: Timestamp,
}
