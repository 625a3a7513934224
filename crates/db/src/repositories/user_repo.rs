//! Repository for the `users` table.

use sqlx::PgPool;

use herdbook_core::types::DbId;

use crate::models::user::User;

/// Column list for `users` queries.
const USER_COLUMNS: &str = "id, email, password_hash, name, created_at, updated_at";

/// Lookup and creation of user accounts.
pub struct UserRepo;

impl UserRepo {
    /// Find a user by email (login lookup).
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .fetch_optional(pool)
            .await
    }

    /// Find a user by id.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<User>, sqlx::Error> {
        let sql = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        sqlx::query_as::<_, User>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Insert a user with a pre-hashed password. Used by seed tooling and tests.
    pub async fn create(
        pool: &PgPool,
        email: &str,
        password_hash: &str,
        name: Option<&str>,
    ) -> Result<User, sqlx::Error> {
        let sql = format!(
            "INSERT INTO users (email, password_hash, name) \
             VALUES ($1, $2, $3) \
             RETURNING {USER_COLUMNS}"
        );
        sqlx::query_as::<_, User>(&sql)
            .bind(email)
            .bind(password_hash)
            .bind(name)
            .fetch_one(pool)
            .await
    }
}
