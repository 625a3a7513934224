//! Row models and response DTOs.
//!
//! Each submodule contains a `FromRow` entity struct matching the database
//! row plus any external-facing response shapes derived from it.

pub mod bull;
pub mod favorite;
pub mod user;
