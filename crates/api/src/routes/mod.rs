pub mod auth;
pub mod bulls;
pub mod health;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/login                 login (public)
///
/// /bulls                      catalog listing (public)
/// /bulls/favorites            favorites listing (requires auth)
/// /bulls/{id}                 detail view (public)
/// /bulls/{id}/favorite        add, remove favorite (requires auth)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/bulls", bulls::router())
}
