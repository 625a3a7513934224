//! Favorite link row model.

use herdbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `favorites` table. At most one link exists per
/// (user, bull) pair; the link row is the only authority on favorite status.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Favorite {
    pub id: DbId,
    pub user_id: DbId,
    pub bull_id: DbId,
    pub created_at: Timestamp,
}
