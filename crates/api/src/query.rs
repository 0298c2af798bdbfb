//! Shared query parameter types for API handlers.
//!
//! Common query structs that appear across multiple handler modules are
//! extracted here to avoid duplication.

use chrono::NaiveDate;
use serde::Deserialize;
use tulong_core::types::Timestamp;

use crate::error::AppError;

/// Generic pagination parameters (`?limit=&offset=`).
///
/// Used by any handler that supports paginated listing. Values are clamped
/// in the handler via [`PaginationParams::clamp`].
#[derive(Debug, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

/// Maximum page size accepted by list endpoints.
const MAX_LIMIT: i64 = 100;

/// Default page size for list endpoints.
const DEFAULT_LIMIT: i64 = 20;

impl PaginationParams {
    /// Resolve the effective `(limit, offset)` pair with defaults applied
    /// and the limit capped at 100.
    pub fn clamp(&self) -> (i64, i64) {
        let limit = self.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let offset = self.offset.unwrap_or(0).max(0);
        (limit, offset)
    }
}

/// Optional reporting window (`?start_date=&end_date=`), both `YYYY-MM-DD`.
///
/// Shared by the request list and the analytics report. Both bounds are
/// inclusive: `start_date` opens at midnight UTC and `end_date` closes at
/// the final instant of that day.
#[derive(Debug, Default, Deserialize)]
pub struct DateWindowParams {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

impl DateWindowParams {
    /// Resolve the window into timestamp bounds, rejecting malformed dates.
    pub fn resolve(&self) -> Result<(Option<Timestamp>, Option<Timestamp>), AppError> {
        let start = match &self.start_date {
            Some(raw) => Some(parse_date(raw, "start_date")?.and_hms_opt(0, 0, 0).ok_or_else(
                || AppError::InternalError("Invalid start-of-day construction".into()),
            )?),
            None => None,
        };
        let end = match &self.end_date {
            Some(raw) => Some(
                parse_date(raw, "end_date")?
                    .and_hms_micro_opt(23, 59, 59, 999_999)
                    .ok_or_else(|| {
                        AppError::InternalError("Invalid end-of-day construction".into())
                    })?,
            ),
            None => None,
        };
        Ok((
            start.map(|dt| dt.and_utc()),
            end.map(|dt| dt.and_utc()),
        ))
    }
}

fn parse_date(raw: &str, field: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").map_err(|_| {
        AppError::BadRequest(format!("Query parameter '{field}' must be YYYY-MM-DD, got '{raw}'"))
    })
}
