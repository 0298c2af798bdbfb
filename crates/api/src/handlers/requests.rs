//! Handlers for the `/requests` resource (aid request intake and review) (PRD-02).

use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use tulong_core::error::CoreError;
use tulong_core::submission::{normalize, RawSubmission};
use tulong_core::types::DbId;
use tulong_db::models::recipient_request::{RecipientRequest, RequestFilter, RequestSummary};
use tulong_db::repositories::{BarangayRepo, RecipientRequestRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::rbac::RequireAdmin;
use crate::query::DateWindowParams;
use crate::response::{DataResponse, PagedResponse};
use crate::state::AppState;

/// Maximum page size for the request list.
const MAX_LIMIT: i64 = 100;

/// Default page size for the request list.
const DEFAULT_LIMIT: i64 = 20;

// ---------------------------------------------------------------------------
// Query types
// ---------------------------------------------------------------------------

/// Query parameters for `GET /requests`.
#[derive(Debug, Deserialize)]
pub struct RequestListParams {
    /// 1-based page number. Defaults to 1.
    pub page: Option<i64>,
    /// Page size. Defaults to 20, capped at 100.
    pub limit: Option<i64>,
    /// Inclusive window start, `YYYY-MM-DD`.
    pub start_date: Option<String>,
    /// Inclusive window end, `YYYY-MM-DD`.
    pub end_date: Option<String>,
    /// Exact calamity type filter.
    pub calamity_type: Option<String>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/requests
///
/// Accept a multipart intake form, normalize it, and persist the request.
/// Public: recipients submit without an account. Returns 201 with the created
/// record (photo bytes replaced by a presence flag).
pub async fn submit_request(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<(StatusCode, Json<DataResponse<RecipientRequest>>)> {
    // 1. Drain the multipart body into the raw form struct. Unknown fields
    //    are ignored so form revisions stay backward compatible.
    let mut raw = RawSubmission::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let Some(name) = field.name().map(str::to_string) else {
            continue;
        };

        if name == "proof_photo" {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            if !bytes.is_empty() {
                raw.proof_photo = Some(bytes.to_vec());
            }
            continue;
        }

        let value = field
            .text()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        match name.as_str() {
            "complete_name" => raw.complete_name = Some(value),
            "age" => raw.age = Some(value),
            "contact_number" => raw.contact_number = Some(value),
            "email_address" => raw.email_address = Some(value),
            "barangay_id" => raw.barangay_id = Some(value),
            "area" => raw.area = Some(value),
            "type_of_calamity" => raw.type_of_calamity = Some(value),
            "no_of_family_members" => raw.no_of_family_members = Some(value),
            "age_group_infant" => raw.age_group_infant = Some(value),
            "age_group_early_child" => raw.age_group_early_child = Some(value),
            "age_group_middle_child" => raw.age_group_middle_child = Some(value),
            "age_group_adolescent" => raw.age_group_adolescent = Some(value),
            "in_kind_necessities" => raw.in_kind_necessities = Some(value),
            "specifications" => raw.specifications = Some(value),
            _ => {}
        }
    }

    // 2. Normalize and validate the form fields.
    let normalized = normalize(raw)?;

    // 3. Resolve the barangay against the reference table.
    let barangay_id = normalized.barangay_id;
    BarangayRepo::find_by_id(&state.pool, barangay_id)
        .await?
        .ok_or(AppError::Core(CoreError::UnknownBarangay {
            id: barangay_id,
        }))?;

    // 4. Persist.
    let created = RecipientRequestRepo::create(&state.pool, &normalized).await?;
    tracing::info!(
        request_id = created.id,
        calamity = %created.type_of_calamity,
        "aid request submitted"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: created })))
}

/// GET /api/v1/requests
///
/// Paginated request list for admins. Barangay-admin accounts only see their
/// own barangay; city-wide admins see everything.
pub async fn list_requests(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(params): Query<RequestListParams>,
) -> AppResult<Json<PagedResponse<RequestSummary>>> {
    let window = DateWindowParams {
        start_date: params.start_date,
        end_date: params.end_date,
    };
    let (start, end) = window.resolve()?;

    let filter = RequestFilter {
        start,
        end,
        calamity_type: params
            .calamity_type
            .filter(|s| !s.trim().is_empty()),
        barangay_id: admin.barangay_id,
    };

    let limit = params.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
    let page = params.page.unwrap_or(1).max(1);
    let offset = (page - 1) * limit;

    let rows = RecipientRequestRepo::list(&state.pool, &filter, limit, offset).await?;
    let total = RecipientRequestRepo::count(&state.pool, &filter).await?;

    Ok(Json(PagedResponse { data: rows, total }))
}

/// GET /api/v1/requests/{id}
///
/// Full request record for admins, photo bytes excluded.
pub async fn get_request(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<Json<DataResponse<RecipientRequest>>> {
    let request = RecipientRequestRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }))?;
    Ok(Json(DataResponse { data: request }))
}

/// GET /api/v1/requests/{id}/photo
///
/// Proof photo bytes for a request. 404 when the request does not exist or
/// carries no photo.
pub async fn get_request_photo(
    State(state): State<AppState>,
    RequireAdmin(_admin): RequireAdmin,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let photo = RecipientRequestRepo::fetch_proof_photo(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Request",
            id,
        }))?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Proof photo for request",
            id,
        }))?;

    // The intake form accepts any image; the original type is not recorded,
    // so serve the bytes as an opaque stream.
    Ok((
        [(header::CONTENT_TYPE, "application/octet-stream")],
        photo,
    ))
}
