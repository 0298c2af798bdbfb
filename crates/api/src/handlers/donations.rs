//! Handlers for the `/donations` resource (pledges and the status lifecycle) (PRD-03).

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tulong_core::error::CoreError;
use tulong_core::roles::ROLE_DONOR;
use tulong_core::status::DonationStatus;
use tulong_core::types::DbId;
use tulong_db::error::DbError;
use tulong_db::models::donation::{CreateDonation, DonationDetails, NewDonationItem, RequestDonations};
use tulong_db::repositories::{DonationRepo, RecipientRequestRepo};

use crate::control_number::generate_control_number;
use crate::error::{AppError, AppResult};
use crate::middleware::rbac::{RequireAdmin, RequireAuth, RequireDonor};
use crate::query::PaginationParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /requests/{id}/donations`.
#[derive(Debug, Deserialize)]
pub struct PledgeRequest {
    pub items: Vec<NewDonationItem>,
}

/// Request body for `POST /donations/status`.
#[derive(Debug, Deserialize)]
pub struct BulkStatusRequest {
    pub donation_ids: Vec<DbId>,
    /// Target status in wire form, e.g. `"COLLECTED"`.
    pub status: String,
    /// Free-text note appended to each status log entry.
    pub remarks: Option<String>,
}

/// Per-donation outcome of a bulk status update.
#[derive(Debug, Serialize)]
pub struct BulkStatusResult {
    pub id: DbId,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Response body for `POST /donations/status`.
#[derive(Debug, Serialize)]
pub struct BulkStatusResponse {
    pub results: Vec<BulkStatusResult>,
    pub updated: usize,
    pub failed: usize,
}

// ---------------------------------------------------------------------------
// Pledging
// ---------------------------------------------------------------------------

/// POST /api/v1/requests/{id}/donations
///
/// Pledge a donation against an aid request. Creates the donation with a
/// fresh control number, its line items, and the initial `PLEDGED` log entry
/// in one transaction. Returns 201 with the full donation details.
pub async fn pledge_donation(
    State(state): State<AppState>,
    RequireDonor(donor): RequireDonor,
    Path(request_id): Path<DbId>,
    Json(input): Json<PledgeRequest>,
) -> AppResult<(StatusCode, Json<DataResponse<DonationDetails>>)> {
    // 1. Validate the item list before touching the database.
    if input.items.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "A pledge must contain at least one item".to_string(),
        )));
    }
    for item in &input.items {
        if item.item_name.trim().is_empty() {
            return Err(AppError::Core(CoreError::MissingField {
                field: "item_name",
            }));
        }
        if item.quantity <= 0 {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Item '{}' must have a positive quantity",
                item.item_name
            ))));
        }
    }

    // 2. The target request must exist.
    RecipientRequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id: request_id,
        }))?;

    // 3. Create the pledge.
    let create_dto = CreateDonation {
        request_id,
        donor_id: Some(donor.account_id),
        control_number: generate_control_number(),
        items: input.items,
    };
    let details = DonationRepo::create(&state.pool, &create_dto).await?;
    tracing::info!(
        donation_id = details.donation.id,
        control_number = %details.donation.control_number,
        request_id,
        "donation pledged"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: details })))
}

/// GET /api/v1/requests/{id}/donations
///
/// All donations pledged against one request, oldest first, with items,
/// status history, and donor names.
pub async fn list_for_request(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(request_id): Path<DbId>,
) -> AppResult<Json<DataResponse<Vec<DonationDetails>>>> {
    RecipientRequestRepo::find_by_id(&state.pool, request_id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id: request_id,
        }))?;

    let donations = DonationRepo::list_by_request(&state.pool, request_id).await?;
    Ok(Json(DataResponse { data: donations }))
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /api/v1/donations/posts
///
/// The admin processing view: requests that have at least one donation,
/// newest request first, each with its donations attached.
pub async fn list_posts(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Query(params): Query<PaginationParams>,
) -> AppResult<Json<PagedResponse<RequestDonations>>> {
    let (limit, offset) = params.clamp();
    let posts = DonationRepo::requests_with_donations(&state.pool, limit, offset).await?;
    let total = DonationRepo::count_requests_with_donations(&state.pool).await?;
    Ok(Json(PagedResponse { data: posts, total }))
}

/// GET /api/v1/donations/mine
///
/// The authenticated donor's own pledges, newest first.
pub async fn list_mine(
    State(state): State<AppState>,
    RequireDonor(donor): RequireDonor,
) -> AppResult<Json<DataResponse<Vec<DonationDetails>>>> {
    let donations = DonationRepo::list_by_donor(&state.pool, donor.account_id).await?;
    Ok(Json(DataResponse { data: donations }))
}

/// GET /api/v1/donations/{id}
///
/// Donation details with items, status history, and donor name. Admins see
/// any donation; donors only their own.
pub async fn get_donation(
    State(state): State<AppState>,
    RequireAuth(user): RequireAuth,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<DonationDetails>>> {
    let details = DonationRepo::details(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Donation",
            id,
        }))?;

    if user.role == ROLE_DONOR && details.donation.donor_id != Some(user.account_id) {
        return Err(AppError::Core(CoreError::Forbidden(
            "You can only view your own donations".into(),
        )));
    }

    Ok(Json(DataResponse { data: details }))
}

// ---------------------------------------------------------------------------
// Status lifecycle
// ---------------------------------------------------------------------------

/// POST /api/v1/donations/status
///
/// Apply one status transition to a batch of donations. Each donation is
/// processed independently inside its own row-locked transaction, so one
/// invalid transition never blocks the rest of the batch. Always returns
/// 200 with a per-donation result list.
pub async fn bulk_update_status(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Json(input): Json<BulkStatusRequest>,
) -> AppResult<Json<DataResponse<BulkStatusResponse>>> {
    if input.donation_ids.is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "donation_ids must not be empty".to_string(),
        )));
    }

    // The target status must parse before any donation is touched.
    let target = DonationStatus::parse(&input.status)?;
    let remarks = input.remarks.unwrap_or_default();

    let mut results = Vec::with_capacity(input.donation_ids.len());
    let mut updated = 0usize;

    for id in input.donation_ids {
        match DonationRepo::transition_status(&state.pool, id, target, &remarks).await {
            Ok(_) => {
                updated += 1;
                results.push(BulkStatusResult {
                    id,
                    ok: true,
                    error: None,
                });
            }
            Err(DbError::Core(core)) => {
                tracing::warn!(donation_id = id, error = %core, "bulk status update skipped");
                results.push(BulkStatusResult {
                    id,
                    ok: false,
                    error: Some(core.to_string()),
                });
            }
            Err(DbError::Sqlx(sqlx_err)) => {
                tracing::error!(donation_id = id, error = %sqlx_err, "bulk status update failed");
                results.push(BulkStatusResult {
                    id,
                    ok: false,
                    error: Some("Database error".to_string()),
                });
            }
        }
    }

    let failed = results.len() - updated;
    Ok(Json(DataResponse {
        data: BulkStatusResponse {
            results,
            updated,
            failed,
        },
    }))
}
