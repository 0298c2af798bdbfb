//! Recipient aid request entity model and projections (PRD-02).

use serde::Serialize;
use sqlx::FromRow;
use tulong_core::aggregate::RequestRecord;
use tulong_core::types::{DbId, Timestamp};

/// Full request row, minus the proof photo bytes.
///
/// `proof_photo` is BYTEA and potentially large, so entity queries select
/// `(proof_photo IS NOT NULL) AS has_proof_photo` instead; the bytes are
/// fetched only by `RecipientRequestRepo::fetch_proof_photo`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipientRequest {
    pub id: DbId,
    pub complete_name: String,
    pub age: i32,
    pub contact_number: String,
    pub email_address: Option<String>,
    pub barangay_id: Option<DbId>,
    pub area: String,
    pub type_of_calamity: String,
    pub no_of_family_members: i32,
    pub number_of_children: i32,
    pub age_group_infant: i32,
    pub age_group_early_child: i32,
    pub age_group_middle_child: i32,
    pub age_group_adolescent: i32,
    pub in_kind_necessities: String,
    pub specifications: serde_json::Value,
    pub has_proof_photo: bool,
    pub created_at: Timestamp,
}

/// Compact row for the admin list view, with the barangay name joined in.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RequestSummary {
    pub id: DbId,
    pub complete_name: String,
    pub contact_number: String,
    pub barangay_name: Option<String>,
    pub area: String,
    pub type_of_calamity: String,
    pub no_of_family_members: i32,
    pub in_kind_necessities: String,
    pub created_at: Timestamp,
}

/// Optional narrowing criteria for request listing and counting.
#[derive(Debug, Clone, Default)]
pub struct RequestFilter {
    pub start: Option<Timestamp>,
    pub end: Option<Timestamp>,
    pub calamity_type: Option<String>,
    pub barangay_id: Option<DbId>,
}

/// Flat row feeding the dashboard aggregations.
///
/// Kept separate from the core input type so the core crate stays free of
/// sqlx; the conversion below is the only bridge.
#[derive(Debug, Clone, FromRow)]
pub struct AggregationSourceRow {
    pub type_of_calamity: String,
    pub barangay_name: Option<String>,
    pub in_kind_necessities: String,
    pub no_of_family_members: i32,
    pub age_group_infant: i32,
    pub age_group_early_child: i32,
    pub age_group_middle_child: i32,
    pub age_group_adolescent: i32,
}

impl From<AggregationSourceRow> for RequestRecord {
    fn from(row: AggregationSourceRow) -> Self {
        RequestRecord {
            type_of_calamity: row.type_of_calamity,
            barangay_name: row.barangay_name,
            in_kind_necessities: row.in_kind_necessities,
            no_of_family_members: row.no_of_family_members,
            age_group_infant: row.age_group_infant,
            age_group_early_child: row.age_group_early_child,
            age_group_middle_child: row.age_group_middle_child,
            age_group_adolescent: row.age_group_adolescent,
        }
    }
}
