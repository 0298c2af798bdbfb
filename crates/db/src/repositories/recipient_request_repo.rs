//! Repository for the `recipient_requests` table (PRD-02, PRD-05).

use sqlx::PgPool;
use tulong_core::aggregate::RequestRecord;
use tulong_core::submission::NormalizedRequest;
use tulong_core::types::{DbId, Timestamp};

use crate::models::recipient_request::{
    AggregationSourceRow, RecipientRequest, RequestFilter, RequestSummary,
};

/// Column list shared across queries. The photo column is replaced by a
/// presence flag; see [`RecipientRequestRepo::fetch_proof_photo`].
const COLUMNS: &str = "id, complete_name, age, contact_number, email_address, barangay_id, \
    area, type_of_calamity, no_of_family_members, number_of_children, age_group_infant, \
    age_group_early_child, age_group_middle_child, age_group_adolescent, in_kind_necessities, \
    specifications, (proof_photo IS NOT NULL) AS has_proof_photo, created_at";

/// Shared WHERE clause applying a [`RequestFilter`]; binds $1..$4 as
/// start, end, calamity_type, barangay_id.
const FILTER_CLAUSE: &str = "($1::timestamptz IS NULL OR r.created_at >= $1)
       AND ($2::timestamptz IS NULL OR r.created_at <= $2)
       AND ($3::text IS NULL OR r.type_of_calamity = $3)
       AND ($4::bigint IS NULL OR r.barangay_id = $4)";

/// Provides persistence for recipient aid requests.
pub struct RecipientRequestRepo;

impl RecipientRequestRepo {
    /// Insert a normalized intake submission, returning the created row.
    pub async fn create(
        pool: &PgPool,
        input: &NormalizedRequest,
    ) -> Result<RecipientRequest, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipient_requests \
                (complete_name, age, contact_number, email_address, barangay_id, area, \
                 type_of_calamity, no_of_family_members, number_of_children, age_group_infant, \
                 age_group_early_child, age_group_middle_child, age_group_adolescent, \
                 in_kind_necessities, specifications, proof_photo)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecipientRequest>(&query)
            .bind(&input.complete_name)
            .bind(input.age)
            .bind(&input.contact_number)
            .bind(&input.email_address)
            .bind(input.barangay_id)
            .bind(&input.area)
            .bind(&input.type_of_calamity)
            .bind(input.no_of_family_members)
            .bind(input.number_of_children)
            .bind(input.age_group_infant)
            .bind(input.age_group_early_child)
            .bind(input.age_group_middle_child)
            .bind(input.age_group_adolescent)
            .bind(&input.in_kind_necessities)
            .bind(&input.specifications)
            .bind(&input.proof_photo)
            .fetch_one(pool)
            .await
    }

    /// Find a request by internal ID.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<RecipientRequest>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM recipient_requests WHERE id = $1");
        sqlx::query_as::<_, RecipientRequest>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Fetch the proof photo bytes for a request.
    ///
    /// The outer `Option` is "no such request"; the inner one is "request
    /// exists but has no photo".
    pub async fn fetch_proof_photo(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<Option<Vec<u8>>>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<Vec<u8>>>(
            "SELECT proof_photo FROM recipient_requests WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(pool)
        .await
    }

    /// List request summaries matching the filter, newest first.
    pub async fn list(
        pool: &PgPool,
        filter: &RequestFilter,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RequestSummary>, sqlx::Error> {
        let query = format!(
            "SELECT r.id, r.complete_name, r.contact_number, b.name AS barangay_name, r.area, \
                    r.type_of_calamity, r.no_of_family_members, r.in_kind_necessities, r.created_at
             FROM recipient_requests r
             LEFT JOIN barangays b ON b.id = r.barangay_id
             WHERE {FILTER_CLAUSE}
             ORDER BY r.created_at DESC, r.id DESC
             LIMIT $5 OFFSET $6"
        );
        sqlx::query_as::<_, RequestSummary>(&query)
            .bind(filter.start)
            .bind(filter.end)
            .bind(&filter.calamity_type)
            .bind(filter.barangay_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(pool)
            .await
    }

    /// Count requests matching the filter.
    pub async fn count(pool: &PgPool, filter: &RequestFilter) -> Result<i64, sqlx::Error> {
        let query = format!(
            "SELECT COUNT(*) FROM recipient_requests r WHERE {FILTER_CLAUSE}"
        );
        sqlx::query_scalar::<_, i64>(&query)
            .bind(filter.start)
            .bind(filter.end)
            .bind(&filter.calamity_type)
            .bind(filter.barangay_id)
            .fetch_one(pool)
            .await
    }

    /// Count requests created at or after `since`, optionally scoped to one
    /// barangay. Powers the "new in the last 24 hours" dashboard counter.
    pub async fn count_created_since(
        pool: &PgPool,
        since: Timestamp,
        barangay_id: Option<DbId>,
    ) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM recipient_requests
             WHERE created_at >= $1
               AND ($2::bigint IS NULL OR barangay_id = $2)",
        )
        .bind(since)
        .bind(barangay_id)
        .fetch_one(pool)
        .await
    }

    /// Pull the flat rows the dashboard aggregations consume, with the
    /// barangay name joined in, oldest first so group encounter order is
    /// stable across runs.
    pub async fn aggregation_records(
        pool: &PgPool,
        start: Option<Timestamp>,
        end: Option<Timestamp>,
    ) -> Result<Vec<RequestRecord>, sqlx::Error> {
        let rows = sqlx::query_as::<_, AggregationSourceRow>(
            "SELECT r.type_of_calamity, b.name AS barangay_name, r.in_kind_necessities, \
                    r.no_of_family_members, r.age_group_infant, r.age_group_early_child, \
                    r.age_group_middle_child, r.age_group_adolescent
             FROM recipient_requests r
             LEFT JOIN barangays b ON b.id = r.barangay_id
             WHERE ($1::timestamptz IS NULL OR r.created_at >= $1)
               AND ($2::timestamptz IS NULL OR r.created_at <= $2)
             ORDER BY r.created_at ASC, r.id ASC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await?;
        Ok(rows.into_iter().map(RequestRecord::from).collect())
    }
}
