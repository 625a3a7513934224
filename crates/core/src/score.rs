//! Composite bull-score weights and formula.
//!
//! The score is a fixed weighted sum of the five trait values. The same
//! weights drive both the SQL expression used for sorting in the repository
//! layer and the in-process computation used for detail views, so the two
//! paths can never disagree.

use serde::{Deserialize, Serialize};

/// Weight applied to the growth trait.
pub const GROWTH_WEIGHT: f64 = 0.30;

/// Weight applied to the calving-ease trait.
pub const CALVING_EASE_WEIGHT: f64 = 0.25;

/// Weight applied to the reproduction trait.
pub const REPRODUCTION_WEIGHT: f64 = 0.20;

/// Weight applied to the moderation trait.
pub const MODERATION_WEIGHT: f64 = 0.15;

/// Weight applied to the carcass trait.
pub const CARCASS_WEIGHT: f64 = 0.10;

/// The five trait values of a bull record.
///
/// Serialized as the `stats` block of detail responses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TraitScores {
    pub growth: f64,
    pub calving_ease: f64,
    pub reproduction: f64,
    pub moderation: f64,
    pub carcass: f64,
}

/// Compute the composite score from a set of trait values.
///
/// Full precision is kept for sorting and comparison; round only for display.
pub fn bull_score(stats: &TraitScores) -> f64 {
    stats.growth * GROWTH_WEIGHT
        + stats.calving_ease * CALVING_EASE_WEIGHT
        + stats.reproduction * REPRODUCTION_WEIGHT
        + stats.moderation * MODERATION_WEIGHT
        + stats.carcass * CARCASS_WEIGHT
}
