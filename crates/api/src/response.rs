//! Shared response envelope types for API handlers.

use serde::Serialize;

/// Standard `{ "data": T }` response envelope.
///
/// Paginated listings use `herdbook_core::query::Page` instead, which carries
/// its own `data` field alongside the pagination metadata.
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
