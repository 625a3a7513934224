//! Catalog query parameters, filter-plan derivation, and pagination math.
//!
//! The `origin` query parameter is overloaded at the HTTP boundary: it either
//! names a stored origin category (`owned`, `catalog`) or switches the query
//! into favorites-only mode. [`OriginFilter`] keeps those meanings as distinct
//! variants and [`FilterPlan`] resolves them against the requesting user, so
//! the storage layer never has to re-interpret a stringly-typed mode.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Pagination defaults
// ---------------------------------------------------------------------------

/// First page number. Pages are 1-based.
pub const DEFAULT_PAGE: i64 = 1;

/// Default number of bulls per page.
pub const DEFAULT_LIMIT: i64 = 10;

/// Maximum number of bulls per page.
pub const MAX_LIMIT: i64 = 100;

// ---------------------------------------------------------------------------
// Catalog enums
// ---------------------------------------------------------------------------

/// Breeding purpose of a bull: suitable for heifers or for cows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Purpose {
    Heifer,
    Cow,
}

/// Stored origin category of a bull record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Origin {
    Owned,
    Catalog,
}

/// Coat category of a bull.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Coat {
    Black,
    Red,
}

macro_rules! text_enum {
    ($ty:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        impl $ty {
            /// The lowercase text stored in the database column.
            pub fn as_str(self) -> &'static str {
                match self {
                    $($ty::$variant => $text,)+
                }
            }
        }

        impl TryFrom<String> for $ty {
            type Error = CoreError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                match value.as_str() {
                    $($text => Ok($ty::$variant),)+
                    other => Err(CoreError::Internal(format!(
                        concat!("Unknown ", stringify!($ty), " value: {}"),
                        other
                    ))),
                }
            }
        }
    };
}

text_enum!(Purpose { Heifer => "heifer", Cow => "cow" });
text_enum!(Origin { Owned => "owned", Catalog => "catalog" });
text_enum!(Coat { Black => "black", Red => "red" });

/// The `origin` query parameter, which is either a stored category or the
/// favorites-only mode of the requesting user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OriginFilter {
    Owned,
    Catalog,
    Favorites,
}

/// Sort direction for the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    /// SQL keyword for interpolation into an `ORDER BY` clause.
    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Recognized catalog query options (`?search=&origin=&coat=&for_heifer=&sort=&page=&limit=`).
///
/// Boundary validation of malformed values is the HTTP layer's job; this
/// struct still rejects out-of-range pagination defensively via `validate()`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct BullQuery {
    /// Case-insensitive substring matched against ear tag OR name.
    pub search: Option<String>,
    pub origin: Option<OriginFilter>,
    pub coat: Option<Coat>,
    /// Restrict to bulls suitable for heifer breeding.
    #[serde(default)]
    pub for_heifer: bool,
    pub sort: Option<SortOrder>,
    #[validate(range(min = 1))]
    pub page: Option<i64>,
    #[validate(range(min = 1))]
    pub limit: Option<i64>,
}

impl BullQuery {
    /// Requested page, defaulting to the first.
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(DEFAULT_PAGE)
    }

    /// Requested page size, defaulted and capped.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT)
    }

    /// Row offset for the requested page.
    ///
    /// Saturates instead of wrapping so an absurdly large page number stays
    /// a valid (empty) query rather than a negative OFFSET.
    pub fn offset(&self) -> i64 {
        self.page().saturating_sub(1).saturating_mul(self.limit())
    }

    /// Sort direction, defaulting to highest score first.
    pub fn sort(&self) -> SortOrder {
        self.sort.unwrap_or_default()
    }

    /// Resolve the filter set against the requesting user.
    ///
    /// Favorites-only without an authenticated user is an empty result set,
    /// never an error.
    pub fn filter_plan(&self, viewer: Option<DbId>) -> FilterPlan {
        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        let (origin, favorites_of) = match self.origin {
            Some(OriginFilter::Favorites) => match viewer {
                Some(user_id) => (None, Some(user_id)),
                None => return FilterPlan::Empty,
            },
            Some(OriginFilter::Owned) => (Some(Origin::Owned), None),
            Some(OriginFilter::Catalog) => (Some(Origin::Catalog), None),
            None => (None, None),
        };

        FilterPlan::Filters(BullFilters {
            search,
            origin,
            favorites_of,
            heifer_only: self.for_heifer,
            coat: self.coat,
        })
    }
}

// ---------------------------------------------------------------------------
// Filter plan
// ---------------------------------------------------------------------------

/// Resolved predicate set, AND-combined by the storage layer.
///
/// The search term expands to an internal `ear_tag OR name` pair; everything
/// else is a single predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BullFilters {
    pub search: Option<String>,
    pub origin: Option<Origin>,
    /// Restrict to bulls favorited by this user.
    pub favorites_of: Option<DbId>,
    pub heifer_only: bool,
    pub coat: Option<Coat>,
}

/// Outcome of resolving query parameters against the requesting user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterPlan {
    /// The query can only match nothing; skip the store entirely.
    Empty,
    Filters(BullFilters),
}

// ---------------------------------------------------------------------------
// Result page
// ---------------------------------------------------------------------------

/// A stable page of query results.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub data: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub limit: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    /// An empty page preserving the requested page/limit.
    ///
    /// `total_pages` is zero by definition when nothing matches.
    pub fn empty(page: i64, limit: i64) -> Self {
        Page {
            data: Vec::new(),
            total: 0,
            page,
            limit,
            total_pages: 0,
        }
    }
}

/// Number of pages needed for `total` rows at `limit` rows per page.
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total == 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
