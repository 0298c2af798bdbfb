//! Route definitions for the `/reports` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::reports;
use crate::state::AppState;

/// Routes mounted at `/reports`.
///
/// ```text
/// GET /analytics  -> get_analytics (admin)
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/analytics", get(reports::get_analytics))
}
