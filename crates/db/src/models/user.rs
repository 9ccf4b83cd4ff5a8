//! User account model and DTOs.

use serde::Deserialize;
use sqlx::FromRow;
use waterline_core::types::{DbId, Timestamp};

/// A user row from the `auth.users` table.
///
/// Deliberately not `Serialize`: the row carries `password_hash`, and
/// handlers expose user data through purpose-built response types.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: DbId,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    pub locale: String,
    pub password_hash: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a new user. The password is already hashed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub locale: Option<String>,
    pub password_hash: String,
}
