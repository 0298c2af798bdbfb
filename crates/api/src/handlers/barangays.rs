//! Handlers for the `/barangays` reference data (PRD-02).

use axum::extract::State;
use axum::Json;
use tulong_db::models::barangay::Barangay;
use tulong_db::repositories::BarangayRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /api/v1/barangays
///
/// List every barangay, alphabetically. Public: the intake form needs this
/// before any authentication exists.
pub async fn list_barangays(
    State(state): State<AppState>,
) -> AppResult<Json<DataResponse<Vec<Barangay>>>> {
    let barangays = BarangayRepo::list(&state.pool).await?;
    Ok(Json(DataResponse { data: barangays }))
}
