//! Route definitions for the `/donations` resource.
//!
//! Pledging lives under `/requests/{id}/donations` (see
//! [`crate::routes::requests`]); this module mounts the donation-centric
//! views and the status lifecycle.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::donations;
use crate::state::AppState;

/// Routes mounted at `/donations`.
///
/// ```text
/// GET  /posts    -> list_posts (admin)
/// GET  /mine     -> list_mine (donor)
/// POST /status   -> bulk_update_status (admin)
/// GET  /{id}     -> get_donation (admin or owning donor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/posts", get(donations::list_posts))
        .route("/mine", get(donations::list_mine))
        .route("/status", post(donations::bulk_update_status))
        .route("/{id}", get(donations::get_donation))
}
