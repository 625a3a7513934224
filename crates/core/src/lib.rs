//! Domain logic for the herdbook catalog.
//!
//! This crate has no database or HTTP dependencies so the scoring formula and
//! query-plan derivation can be unit tested in isolation and reused by any
//! future CLI or import tooling.

pub mod error;
pub mod query;
pub mod score;
pub mod types;
