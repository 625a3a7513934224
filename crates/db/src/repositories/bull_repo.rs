//! Query engine for the bull catalog.
//!
//! Builds the filtered, score-sorted, paginated result set and reconciles it
//! with the favorites relation. The composite score is computed inside the
//! query from the same weight constants the in-process formula uses, so
//! sorting and display can never disagree.

use sqlx::PgPool;

use herdbook_core::query::{total_pages, BullFilters, BullQuery, FilterPlan, Page};
use herdbook_core::score::{
    CALVING_EASE_WEIGHT, CARCASS_WEIGHT, GROWTH_WEIGHT, MODERATION_WEIGHT, REPRODUCTION_WEIGHT,
};
use herdbook_core::types::DbId;

use crate::models::bull::{BullWithScore, NewBull};
use crate::repositories::FavoriteRepo;

/// Column list for `bulls` queries. Trait columns are NUMERIC(5,2) in the
/// schema and are cast to FLOAT8 at the boundary.
const BULL_COLUMNS: &str = "\
    id, ear_tag, name, purpose, origin, coat, breed, age_months, highlight, \
    growth::FLOAT8 AS growth, calving_ease::FLOAT8 AS calving_ease, \
    reproduction::FLOAT8 AS reproduction, moderation::FLOAT8 AS moderation, \
    carcass::FLOAT8 AS carcass, created_at, updated_at";

/// Optional-filter WHERE clauses shared by the count and page queries.
///
/// Every filter is a null-guarded bind so one static clause list serves all
/// filter combinations, and the count can never drift from the page:
/// - `$1` search pattern (ILIKE against ear tag OR name)
/// - `$2` origin category
/// - `$3` purpose
/// - `$4` coat
/// - `$5` favorites-of user id (membership against the favorites relation)
const BULL_FILTER_CLAUSES: &str = "\
    ($1::TEXT IS NULL OR ear_tag ILIKE $1 OR name ILIKE $1) \
    AND ($2::TEXT IS NULL OR origin = $2) \
    AND ($3::TEXT IS NULL OR purpose = $3) \
    AND ($4::TEXT IS NULL OR coat = $4) \
    AND ($5::BIGINT IS NULL OR EXISTS (\
        SELECT 1 FROM favorites \
        WHERE favorites.bull_id = bulls.id AND favorites.user_id = $5))";

/// SQL expression computing the composite score from the trait columns.
///
/// Interpolates the canonical weights from `herdbook_core::score`.
fn score_expression() -> String {
    format!(
        "(growth * {GROWTH_WEIGHT:.2} + calving_ease * {CALVING_EASE_WEIGHT:.2} \
         + reproduction * {REPRODUCTION_WEIGHT:.2} + moderation * {MODERATION_WEIGHT:.2} \
         + carcass * {CARCASS_WEIGHT:.2})::FLOAT8"
    )
}

/// Escape LIKE/ILIKE metacharacters so the search term matches literally.
fn escape_like(term: &str) -> String {
    term.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// Resolved bind values for [`BULL_FILTER_CLAUSES`].
struct FilterBinds {
    search_pattern: Option<String>,
    origin: Option<&'static str>,
    purpose: Option<&'static str>,
    coat: Option<&'static str>,
    favorites_of: Option<DbId>,
}

impl FilterBinds {
    fn from_filters(filters: &BullFilters) -> Self {
        FilterBinds {
            search_pattern: filters
                .search
                .as_deref()
                .map(|term| format!("%{}%", escape_like(term))),
            origin: filters.origin.map(|o| o.as_str()),
            purpose: filters.heifer_only.then_some("heifer"),
            coat: filters.coat.map(|c| c.as_str()),
            favorites_of: filters.favorites_of,
        }
    }
}

/// Read-side query operations over the bull catalog.
pub struct BullRepo;

impl BullRepo {
    /// Filtered, score-sorted, paginated catalog listing.
    ///
    /// `viewer` is the requesting user, if any; it drives both the
    /// favorites-only filter resolution and the per-row `is_favorite` flag.
    /// An anonymous favorites-only query yields an empty page, never an error.
    pub async fn find_all(
        pool: &PgPool,
        query: &BullQuery,
        viewer: Option<DbId>,
    ) -> Result<Page<BullWithScore>, sqlx::Error> {
        let filters = match query.filter_plan(viewer) {
            FilterPlan::Empty => return Ok(Page::empty(query.page(), query.limit())),
            FilterPlan::Filters(filters) => filters,
        };
        let binds = FilterBinds::from_filters(&filters);

        // Total matching count, independent of pagination.
        let count_sql = format!("SELECT COUNT(*) FROM bulls WHERE {BULL_FILTER_CLAUSES}");
        let total: i64 = sqlx::query_scalar(&count_sql)
            .bind(&binds.search_pattern)
            .bind(binds.origin)
            .bind(binds.purpose)
            .bind(binds.coat)
            .bind(binds.favorites_of)
            .fetch_one(pool)
            .await?;

        // Ties break by id ascending in both directions so pagination stays
        // stable across pages and re-queries.
        let order = query.sort().as_sql();
        let score = score_expression();
        let page_sql = format!(
            "SELECT {BULL_COLUMNS}, {score} AS bull_score, \
                EXISTS (SELECT 1 FROM favorites \
                    WHERE favorites.bull_id = bulls.id AND favorites.user_id = $8) AS is_favorite \
             FROM bulls \
             WHERE {BULL_FILTER_CLAUSES} \
             ORDER BY bull_score {order}, id ASC \
             LIMIT $6 OFFSET $7"
        );
        let data = sqlx::query_as::<_, BullWithScore>(&page_sql)
            .bind(&binds.search_pattern)
            .bind(binds.origin)
            .bind(binds.purpose)
            .bind(binds.coat)
            .bind(binds.favorites_of)
            .bind(query.limit())
            .bind(query.offset())
            .bind(viewer)
            .fetch_all(pool)
            .await?;

        Ok(Page {
            data,
            total,
            page: query.page(),
            limit: query.limit(),
            total_pages: total_pages(total, query.limit()),
        })
    }

    /// Look up a single bull with its score and the viewer's favorite flag.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
        viewer: Option<DbId>,
    ) -> Result<Option<BullWithScore>, sqlx::Error> {
        let score = score_expression();
        let sql = format!(
            "SELECT {BULL_COLUMNS}, {score} AS bull_score, \
                EXISTS (SELECT 1 FROM favorites \
                    WHERE favorites.bull_id = bulls.id AND favorites.user_id = $2) AS is_favorite \
             FROM bulls \
             WHERE id = $1"
        );
        sqlx::query_as::<_, BullWithScore>(&sql)
            .bind(id)
            .bind(viewer)
            .fetch_optional(pool)
            .await
    }

    /// Insert a catalog record, skipping when the ear tag is already taken.
    ///
    /// Returns the new id, or `None` when a row with that ear tag exists.
    /// The seed/import path is the only writer of bulls; the API surface is
    /// read-only apart from favorites.
    pub async fn insert(pool: &PgPool, bull: &NewBull) -> Result<Option<DbId>, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO bulls \
                (ear_tag, name, purpose, origin, coat, breed, age_months, highlight, \
                 growth, calving_ease, reproduction, moderation, carcass) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13) \
             ON CONFLICT (ear_tag) DO NOTHING \
             RETURNING id",
        )
        .bind(&bull.ear_tag)
        .bind(&bull.name)
        .bind(bull.purpose.as_str())
        .bind(bull.origin.as_str())
        .bind(bull.coat.as_str())
        .bind(&bull.breed)
        .bind(bull.age_months)
        .bind(&bull.highlight)
        .bind(bull.traits.growth)
        .bind(bull.traits.calving_ease)
        .bind(bull.traits.reproduction)
        .bind(bull.traits.moderation)
        .bind(bull.traits.carcass)
        .fetch_optional(pool)
        .await
    }

    /// Check whether a bull id exists.
    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM bulls WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    /// The favorites page for a user: forces favorites-only mode while the
    /// remaining filters still apply.
    ///
    /// A user with zero favorite links short-circuits to an empty page
    /// without running the filtered query. An empty membership set must not
    /// be mistaken for "no origin filter", which would return the whole
    /// catalog.
    pub async fn list_favorites(
        pool: &PgPool,
        user_id: DbId,
        query: &BullQuery,
    ) -> Result<Page<BullWithScore>, sqlx::Error> {
        let link_count = FavoriteRepo::count_for_user(pool, user_id).await?;
        if link_count == 0 {
            return Ok(Page::empty(query.page(), query.limit()));
        }

        let forced = BullQuery {
            origin: Some(herdbook_core::query::OriginFilter::Favorites),
            ..query.clone()
        };
        Self::find_all(pool, &forced, Some(user_id)).await
    }
}
