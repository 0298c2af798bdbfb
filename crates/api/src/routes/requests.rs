//! Route definitions for the `/requests` resource.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{donations, requests};
use crate::state::AppState;

/// Routes mounted at `/requests`.
///
/// ```text
/// POST /                -> submit_request (public)
/// GET  /                -> list_requests (admin)
/// GET  /{id}            -> get_request (admin)
/// GET  /{id}/photo      -> get_request_photo (admin)
/// GET  /{id}/donations  -> list_for_request (admin)
/// POST /{id}/donations  -> pledge_donation (donor)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/",
            post(requests::submit_request).get(requests::list_requests),
        )
        .route("/{id}", get(requests::get_request))
        .route("/{id}/photo", get(requests::get_request_photo))
        .route(
            "/{id}/donations",
            get(donations::list_for_request).post(donations::pledge_donation),
        )
}
