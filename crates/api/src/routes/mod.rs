pub mod auth;
pub mod barangays;
pub mod catalog;
pub mod donations;
pub mod health;
pub mod reports;
pub mod requests;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/signup                        donor signup (public)
/// /auth/login                         login (public)
/// /auth/refresh                       refresh (public)
/// /auth/logout                        logout (requires auth)
///
/// /barangays                          barangay reference list (public)
/// /catalog                            calamity + necessity catalogs (public)
///
/// /requests                           submit (public POST), list (admin GET)
/// /requests/{id}                      request detail (admin)
/// /requests/{id}/photo                proof photo bytes (admin)
/// /requests/{id}/donations            donations for a request (admin GET),
///                                     pledge (donor POST)
///
/// /donations/posts                    requests with donations (admin)
/// /donations/mine                     the donor's own pledges (donor)
/// /donations/status                   bulk status transition (admin POST)
/// /donations/{id}                     donation detail (admin or owning donor)
///
/// /reports/analytics                   dashboard report (admin)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        // Authentication routes (signup, login, refresh, logout).
        .nest("/auth", auth::router())
        // Public reference data for the intake form.
        .nest("/barangays", barangays::router())
        .nest("/catalog", catalog::router())
        // Aid request intake and review (PRD-02).
        .nest("/requests", requests::router())
        // Donation pledges and the status lifecycle (PRD-03).
        .nest("/donations", donations::router())
        // Admin analytics dashboard (PRD-05).
        .nest("/reports", reports::router())
}
