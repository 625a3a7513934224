//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods that accept
//! `&PgPool` as the first argument.

pub mod bull_repo;
pub mod favorite_repo;
pub mod user_repo;

pub use bull_repo::BullRepo;
pub use favorite_repo::FavoriteRepo;
pub use user_repo::UserRepo;
