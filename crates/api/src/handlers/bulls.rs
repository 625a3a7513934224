//! Handlers for the `/bulls` resource: catalog listing, detail view, and the
//! per-user favorites set.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use validator::Validate;

use herdbook_core::error::CoreError;
use herdbook_core::query::BullQuery;
use herdbook_core::types::DbId;
use herdbook_db::models::bull::BullDetail;
use herdbook_db::repositories::{BullRepo, FavoriteRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::{AuthUser, MaybeAuthUser};
use crate::response::DataResponse;
use crate::state::AppState;

/// Reject out-of-range pagination before touching the store.
fn validate_query(params: &BullQuery) -> Result<(), AppError> {
    params
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(e.to_string())))
}

// ---------------------------------------------------------------------------
// Catalog queries
// ---------------------------------------------------------------------------

/// GET /api/v1/bulls
///
/// Filtered, score-sorted, paginated catalog listing. Anonymous requests are
/// allowed; the favorite flags are then always false and a favorites-only
/// origin yields an empty page.
pub async fn list_bulls(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Query(params): Query<BullQuery>,
) -> AppResult<impl IntoResponse> {
    validate_query(&params)?;

    let page = BullRepo::find_all(&state.pool, &params, viewer.user_id()).await?;

    Ok(Json(page))
}

/// GET /api/v1/bulls/favorites
///
/// The authenticated user's favorites page. Remaining filters still apply.
pub async fn list_favorites(
    auth: AuthUser,
    State(state): State<AppState>,
    Query(params): Query<BullQuery>,
) -> AppResult<impl IntoResponse> {
    validate_query(&params)?;

    let page = BullRepo::list_favorites(&state.pool, auth.user_id, &params).await?;

    Ok(Json(page))
}

/// GET /api/v1/bulls/{id}
///
/// Detail view with the stats block and the composite score recomputed from it.
pub async fn get_bull(
    viewer: MaybeAuthUser,
    State(state): State<AppState>,
    Path(bull_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let row = BullRepo::find_by_id(&state.pool, bull_id, viewer.user_id())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Bull",
            id: bull_id,
        }))?;

    Ok(Json(DataResponse {
        data: BullDetail::from(row),
    }))
}

// ---------------------------------------------------------------------------
// Favorite toggle
// ---------------------------------------------------------------------------

/// POST /api/v1/bulls/{id}/favorite
///
/// Add the bull to the user's favorites. Idempotent: repeating the request
/// returns the existing link.
pub async fn add_favorite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(bull_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_bull_exists(&state, bull_id).await?;

    let favorite = FavoriteRepo::add(&state.pool, auth.user_id, bull_id).await?;

    tracing::info!(bull_id, user_id = auth.user_id, "Favorite added");

    Ok(Json(DataResponse { data: favorite }))
}

/// DELETE /api/v1/bulls/{id}/favorite
///
/// Remove the bull from the user's favorites. Removing an absent link
/// succeeds. Returns 204 No Content.
pub async fn remove_favorite(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(bull_id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    ensure_bull_exists(&state, bull_id).await?;

    FavoriteRepo::remove(&state.pool, auth.user_id, bull_id).await?;

    tracing::info!(bull_id, user_id = auth.user_id, "Favorite removed");

    Ok(StatusCode::NO_CONTENT)
}

/// Both toggle operations require the referenced bull to exist.
async fn ensure_bull_exists(state: &AppState, bull_id: DbId) -> AppResult<()> {
    if !BullRepo::exists(&state.pool, bull_id).await? {
        return Err(AppError::Core(CoreError::NotFound {
            entity: "Bull",
            id: bull_id,
        }));
    }
    Ok(())
}
