//! Route definitions for the `/barangays` reference data.

use axum::routing::get;
use axum::Router;

use crate::handlers::barangays;
use crate::state::AppState;

/// Routes mounted at `/barangays`.
///
/// ```text
/// GET /  -> list_barangays (public)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(barangays::list_barangays))
}
