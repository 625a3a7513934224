//! Repository for the `favorites` relation.
//!
//! Both toggle operations are idempotent: adding an existing link returns it
//! unchanged and removing an absent link succeeds. The uniqueness constraint
//! on (user_id, bull_id) is the authoritative guard under concurrent adds.

use sqlx::PgPool;

use herdbook_core::types::DbId;

use crate::models::favorite::Favorite;

/// Column list for `favorites` queries.
const FAVORITE_COLUMNS: &str = "id, user_id, bull_id, created_at";

/// Idempotent add/remove of (user, bull) favorite links.
pub struct FavoriteRepo;

impl FavoriteRepo {
    /// Insert a favorite link, or return the existing one.
    ///
    /// Uses `ON CONFLICT` so a uniqueness race between concurrent duplicate
    /// requests resolves to the surviving row instead of a conflict error.
    /// The caller is responsible for verifying the bull exists first.
    pub async fn add(pool: &PgPool, user_id: DbId, bull_id: DbId) -> Result<Favorite, sqlx::Error> {
        let sql = format!(
            "INSERT INTO favorites (user_id, bull_id) \
             VALUES ($1, $2) \
             ON CONFLICT (user_id, bull_id) DO UPDATE SET user_id = EXCLUDED.user_id \
             RETURNING {FAVORITE_COLUMNS}"
        );
        sqlx::query_as::<_, Favorite>(&sql)
            .bind(user_id)
            .bind(bull_id)
            .fetch_one(pool)
            .await
    }

    /// Delete a favorite link if present.
    ///
    /// Returns `true` if a link was removed. Removing an absent link is not
    /// an error.
    pub async fn remove(pool: &PgPool, user_id: DbId, bull_id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND bull_id = $2")
            .bind(user_id)
            .bind(bull_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Number of favorite links held by a user.
    pub async fn count_for_user(pool: &PgPool, user_id: DbId) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(pool)
            .await
    }
}
