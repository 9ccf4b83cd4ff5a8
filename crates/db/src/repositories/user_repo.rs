//! Repository for the `auth.users` table.

use sqlx::PgPool;
use waterline_core::types::DbId;

use crate::models::user::{CreateUser, User};

const COLUMNS: &str =
    "id, name, email, email_verified, locale, password_hash, created_at, updated_at";

/// Provides account lookups and creation.
pub struct UserRepo;

impl UserRepo {
    /// Insert a new user, returning the created row.
    ///
    /// Duplicate emails fail with a unique-constraint violation
    /// (classified as CONFLICT at the API boundary). The locale defaults
    /// to `en` when omitted.
    pub async fn create(pool: &PgPool, input: &CreateUser) -> Result<User, sqlx::Error> {
        let query = format!(
            "INSERT INTO auth.users (name, email, locale, password_hash)
             VALUES ($1, $2, COALESCE($3, 'en'), $4)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, User>(&query)
            .bind(&input.name)
            .bind(&input.email)
            .bind(&input.locale)
            .bind(&input.password_hash)
            .fetch_one(pool)
            .await
    }

    /// Find a user by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM auth.users WHERE id = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by email.
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM auth.users WHERE email = $1");
        sqlx::query_as::<_, User>(&query)
            .bind(email)
            .fetch_optional(pool)
            .await
    }
}
