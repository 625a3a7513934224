//! Route definitions for the `/bulls` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::bulls;
use crate::state::AppState;

/// Routes mounted at `/bulls`.
///
/// `/favorites` must be registered as a literal path so it is matched
/// ahead of the `/{id}` parameter route.
///
/// ```text
/// GET    /                 -> list_bulls
/// GET    /favorites        -> list_favorites (requires auth)
/// GET    /{id}             -> get_bull
/// POST   /{id}/favorite    -> add_favorite (requires auth)
/// DELETE /{id}/favorite    -> remove_favorite (requires auth)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(bulls::list_bulls))
        .route("/favorites", get(bulls::list_favorites))
        .route("/{id}", get(bulls::get_bull))
        .route(
            "/{id}/favorite",
            post(bulls::add_favorite).delete(bulls::remove_favorite),
        )
}
