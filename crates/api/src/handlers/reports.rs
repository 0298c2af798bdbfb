//! Handlers for the `/reports` resource (admin analytics) (PRD-05).

use axum::extract::{Query, State};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use tulong_core::aggregate::{
    age_group_distribution_per_calamity, count_by_calamity_type, most_impacted_barangay_per_calamity,
    most_requested_calamity_per_barangay, most_requested_item_per_calamity, AgeGroupDistribution,
    BarangayCalamity, CalamityCount, CalamityImpact, InKindByCalamity,
};
use tulong_db::models::recipient_request::RequestFilter;
use tulong_db::repositories::RecipientRequestRepo;

use crate::error::AppResult;
use crate::middleware::rbac::RequireAdmin;
use crate::query::DateWindowParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// The assembled analytics dashboard payload.
///
/// The five aggregation blocks always cover the whole city (within the
/// requested window); only the two counters honor a barangay-admin's scope.
#[derive(Debug, Serialize)]
pub struct AnalyticsReport {
    /// Requests per calamity type, most frequent first.
    pub requests_per_calamity: Vec<CalamityCount>,
    /// Hardest-hit barangay for each calamity type.
    pub most_impacted_barangays: Vec<CalamityImpact>,
    /// Most-reported calamity type for each barangay.
    pub top_calamity_per_barangay: Vec<BarangayCalamity>,
    /// Most-requested in-kind item for each calamity type.
    pub most_requested_items: Vec<InKindByCalamity>,
    /// Affected-population age bands per calamity type.
    pub age_group_distribution: Vec<AgeGroupDistribution>,
    /// Total requests in the window (barangay-scoped for barangay admins).
    pub total_requests: i64,
    /// Requests created in the last 24 hours (same scoping as `total_requests`).
    pub new_requests_count: i64,
}

/// GET /api/v1/reports/analytics
///
/// Compute the dashboard report over one record pull. Accepts an optional
/// `start_date`/`end_date` window; without it the report covers all time.
pub async fn get_analytics(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(window): Query<DateWindowParams>,
) -> AppResult<Json<DataResponse<AnalyticsReport>>> {
    let (start, end) = window.resolve()?;

    // One pull feeds all five aggregations so they describe the same data.
    let records = RecipientRequestRepo::aggregation_records(&state.pool, start, end).await?;

    let counter_filter = RequestFilter {
        start,
        end,
        calamity_type: None,
        barangay_id: admin.barangay_id,
    };
    let total_requests = RecipientRequestRepo::count(&state.pool, &counter_filter).await?;

    let since = Utc::now() - chrono::Duration::hours(24);
    let new_requests_count =
        RecipientRequestRepo::count_created_since(&state.pool, since, admin.barangay_id).await?;

    let report = AnalyticsReport {
        requests_per_calamity: count_by_calamity_type(&records),
        most_impacted_barangays: most_impacted_barangay_per_calamity(&records),
        top_calamity_per_barangay: most_requested_calamity_per_barangay(&records),
        most_requested_items: most_requested_item_per_calamity(&records),
        age_group_distribution: age_group_distribution_per_calamity(&records),
        total_requests,
        new_requests_count,
    };

    Ok(Json(DataResponse { data: report }))
}
