//! Bull row model and detail response.

use herdbook_core::query::{Coat, Origin, Purpose};
use herdbook_core::score::{bull_score, TraitScores};
use herdbook_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A `bulls` row enriched with the two derived query-time fields:
/// the composite score (computed in SQL for sorting) and the favorite flag
/// of the requesting user (membership lookup, never stored).
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct BullWithScore {
    pub id: DbId,
    pub ear_tag: String,
    pub name: String,
    #[sqlx(try_from = "String")]
    pub purpose: Purpose,
    #[sqlx(try_from = "String")]
    pub origin: Origin,
    #[sqlx(try_from = "String")]
    pub coat: Coat,
    pub breed: String,
    pub age_months: i32,
    pub highlight: Option<String>,
    pub growth: f64,
    pub calving_ease: f64,
    pub reproduction: f64,
    pub moderation: f64,
    pub carcass: f64,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub bull_score: f64,
    pub is_favorite: bool,
}

impl BullWithScore {
    /// The five trait values as a stats block.
    pub fn stats(&self) -> TraitScores {
        TraitScores {
            growth: self.growth,
            calving_ease: self.calving_ease,
            reproduction: self.reproduction,
            moderation: self.moderation,
            carcass: self.carcass,
        }
    }
}

/// Insert payload for a catalog record.
///
/// Bulls are written only by the seed/import tooling; the API surface reads
/// the catalog and toggles favorites.
#[derive(Debug, Clone)]
pub struct NewBull {
    pub ear_tag: String,
    pub name: String,
    pub purpose: Purpose,
    pub origin: Origin,
    pub coat: Coat,
    pub breed: String,
    pub age_months: i32,
    pub highlight: Option<String>,
    pub traits: TraitScores,
}

/// Detail view of a single bull with the trait values grouped as `stats`.
///
/// The score here is recomputed in process from the stats block rather than
/// read back from SQL; both paths use the same weights.
#[derive(Debug, Clone, Serialize)]
pub struct BullDetail {
    pub id: DbId,
    pub ear_tag: String,
    pub name: String,
    pub purpose: Purpose,
    pub origin: Origin,
    pub coat: Coat,
    pub breed: String,
    pub age_months: i32,
    pub highlight: Option<String>,
    pub stats: TraitScores,
    pub bull_score: f64,
    pub is_favorite: bool,
}

impl From<BullWithScore> for BullDetail {
    fn from(row: BullWithScore) -> Self {
        let stats = row.stats();
        BullDetail {
            id: row.id,
            ear_tag: row.ear_tag,
            name: row.name,
            purpose: row.purpose,
            origin: row.origin,
            coat: row.coat,
            breed: row.breed,
            age_months: row.age_months,
            highlight: row.highlight,
            bull_score: bull_score(&stats),
            stats,
            is_favorite: row.is_favorite,
        }
    }
}
