//! Repository for the `donations`, `donation_items`, and
//! `donation_status_logs` tables (PRD-03).

use sqlx::{FromRow, PgPool};
use tulong_core::error::CoreError;
use tulong_core::status::DonationStatus;
use tulong_core::types::{DbId, Timestamp};

use crate::error::DbError;
use crate::models::donation::{
    CreateDonation, Donation, DonationDetails, DonationItem, RequestDonations, StatusLog,
};
use crate::models::recipient_request::RequestSummary;

/// Column list for the `donations` table.
const COLUMNS: &str = "id, control_number, request_id, donor_id, status, created_at, updated_at";

/// Column list for `donations` joined with the donor's account name.
const JOINED_COLUMNS: &str = "d.id, d.control_number, d.request_id, d.donor_id, d.status, \
    d.created_at, d.updated_at, a.name AS donor_name";

/// Column list for the `donation_items` table.
const ITEM_COLUMNS: &str = "id, donation_id, item_name, quantity";

/// Column list for the `donation_status_logs` table.
const LOG_COLUMNS: &str = "id, donation_id, status, remarks, logged_at";

/// A donation row with the donor name joined in.
#[derive(Debug, FromRow)]
struct DonationDonorRow {
    id: DbId,
    control_number: String,
    request_id: DbId,
    donor_id: Option<DbId>,
    status: String,
    created_at: Timestamp,
    updated_at: Timestamp,
    donor_name: Option<String>,
}

impl DonationDonorRow {
    fn split(self) -> (Donation, Option<String>) {
        (
            Donation {
                id: self.id,
                control_number: self.control_number,
                request_id: self.request_id,
                donor_id: self.donor_id,
                status: self.status,
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            self.donor_name,
        )
    }
}

/// Provides persistence for donations and their status lifecycle.
pub struct DonationRepo;

impl DonationRepo {
    /// Create a donation pledge in one transaction: the donation row, its
    /// line items, and the initial `PLEDGED` status log entry.
    pub async fn create(
        pool: &PgPool,
        input: &CreateDonation,
    ) -> Result<DonationDetails, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let insert = format!(
            "INSERT INTO donations (control_number, request_id, donor_id)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        let donation = sqlx::query_as::<_, Donation>(&insert)
            .bind(&input.control_number)
            .bind(input.request_id)
            .bind(input.donor_id)
            .fetch_one(&mut *tx)
            .await?;

        let mut items = Vec::with_capacity(input.items.len());
        let item_insert = format!(
            "INSERT INTO donation_items (donation_id, item_name, quantity)
             VALUES ($1, $2, $3)
             RETURNING {ITEM_COLUMNS}"
        );
        for item in &input.items {
            let row = sqlx::query_as::<_, DonationItem>(&item_insert)
                .bind(donation.id)
                .bind(&item.item_name)
                .bind(item.quantity)
                .fetch_one(&mut *tx)
                .await?;
            items.push(row);
        }

        let log_insert = format!(
            "INSERT INTO donation_status_logs (donation_id, status, remarks)
             VALUES ($1, $2, $3)
             RETURNING {LOG_COLUMNS}"
        );
        let initial_log = sqlx::query_as::<_, StatusLog>(&log_insert)
            .bind(donation.id)
            .bind(DonationStatus::Pledged.as_str())
            .bind("Donation pledged")
            .fetch_one(&mut *tx)
            .await?;

        let donor_name = match input.donor_id {
            Some(donor_id) => {
                sqlx::query_scalar::<_, String>("SELECT name FROM accounts WHERE id = $1")
                    .bind(donor_id)
                    .fetch_optional(&mut *tx)
                    .await?
            }
            None => None,
        };

        tx.commit().await?;
        Ok(DonationDetails {
            donation,
            donor_name,
            items,
            status_logs: vec![initial_log],
        })
    }

    /// Find a donation by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Donation>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM donations WHERE id = $1");
        sqlx::query_as::<_, Donation>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a donation by ID, enriched with items, status history, and
    /// donor name.
    pub async fn details(pool: &PgPool, id: DbId) -> Result<Option<DonationDetails>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM donations d
             LEFT JOIN accounts a ON a.id = d.donor_id
             WHERE d.id = $1"
        );
        let row = sqlx::query_as::<_, DonationDonorRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Some(Self::enrich(pool, row).await?)),
            None => Ok(None),
        }
    }

    /// List all donations pledged against one request, oldest first.
    pub async fn list_by_request(
        pool: &PgPool,
        request_id: DbId,
    ) -> Result<Vec<DonationDetails>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM donations d
             LEFT JOIN accounts a ON a.id = d.donor_id
             WHERE d.request_id = $1
             ORDER BY d.created_at ASC, d.id ASC"
        );
        let rows = sqlx::query_as::<_, DonationDonorRow>(&query)
            .bind(request_id)
            .fetch_all(pool)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(Self::enrich(pool, row).await?);
        }
        Ok(out)
    }

    /// List a donor's own pledges, newest first.
    pub async fn list_by_donor(
        pool: &PgPool,
        donor_id: DbId,
    ) -> Result<Vec<DonationDetails>, sqlx::Error> {
        let query = format!(
            "SELECT {JOINED_COLUMNS}
             FROM donations d
             LEFT JOIN accounts a ON a.id = d.donor_id
             WHERE d.donor_id = $1
             ORDER BY d.created_at DESC, d.id DESC"
        );
        let rows = sqlx::query_as::<_, DonationDonorRow>(&query)
            .bind(donor_id)
            .fetch_all(pool)
            .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(Self::enrich(pool, row).await?);
        }
        Ok(out)
    }

    /// Page through requests that have at least one donation, newest first,
    /// each with its full donation list. This backs the admin processing
    /// view.
    pub async fn requests_with_donations(
        pool: &PgPool,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<RequestDonations>, sqlx::Error> {
        let summaries = sqlx::query_as::<_, RequestSummary>(
            "SELECT r.id, r.complete_name, r.contact_number, b.name AS barangay_name, r.area, \
                    r.type_of_calamity, r.no_of_family_members, r.in_kind_necessities, r.created_at
             FROM recipient_requests r
             LEFT JOIN barangays b ON b.id = r.barangay_id
             WHERE EXISTS (SELECT 1 FROM donations d WHERE d.request_id = r.id)
             ORDER BY r.created_at DESC, r.id DESC
             LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        let mut out = Vec::with_capacity(summaries.len());
        for request in summaries {
            let donations = Self::list_by_request(pool, request.id).await?;
            out.push(RequestDonations { request, donations });
        }
        Ok(out)
    }

    /// Count requests that have at least one donation.
    pub async fn count_requests_with_donations(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM recipient_requests r
             WHERE EXISTS (SELECT 1 FROM donations d WHERE d.request_id = r.id)",
        )
        .fetch_one(pool)
        .await
    }

    /// Apply one status transition atomically.
    ///
    /// The donation row is locked with `FOR UPDATE` for the duration of the
    /// transaction, so concurrent transitions on the same donation serialize
    /// and each one validates against the status its predecessor committed.
    /// On a validation failure nothing is written: the transaction rolls
    /// back with the status and log untouched.
    pub async fn transition_status(
        pool: &PgPool,
        id: DbId,
        target: DonationStatus,
        remarks: &str,
    ) -> Result<Donation, DbError> {
        let mut tx = pool.begin().await?;

        let locked = format!("SELECT {COLUMNS} FROM donations WHERE id = $1 FOR UPDATE");
        let donation = sqlx::query_as::<_, Donation>(&locked)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound {
                entity: "Donation",
                id,
            })?;

        let current = DonationStatus::parse(&donation.status)?;
        current.validate_transition(target)?;

        let update = format!(
            "UPDATE donations SET status = $2 WHERE id = $1 RETURNING {COLUMNS}"
        );
        let updated = sqlx::query_as::<_, Donation>(&update)
            .bind(id)
            .bind(target.as_str())
            .fetch_one(&mut *tx)
            .await?;

        sqlx::query(
            "INSERT INTO donation_status_logs (donation_id, status, remarks)
             VALUES ($1, $2, $3)",
        )
        .bind(id)
        .bind(target.as_str())
        .bind(remarks)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(updated)
    }

    /// Fetch the status history for a donation, oldest entry first.
    pub async fn status_logs(pool: &PgPool, id: DbId) -> Result<Vec<StatusLog>, sqlx::Error> {
        let query = format!(
            "SELECT {LOG_COLUMNS} FROM donation_status_logs
             WHERE donation_id = $1
             ORDER BY logged_at ASC, id ASC"
        );
        sqlx::query_as::<_, StatusLog>(&query)
            .bind(id)
            .fetch_all(pool)
            .await
    }

    async fn enrich(pool: &PgPool, row: DonationDonorRow) -> Result<DonationDetails, sqlx::Error> {
        let (donation, donor_name) = row.split();

        let item_query = format!(
            "SELECT {ITEM_COLUMNS} FROM donation_items WHERE donation_id = $1 ORDER BY id ASC"
        );
        let items = sqlx::query_as::<_, DonationItem>(&item_query)
            .bind(donation.id)
            .fetch_all(pool)
            .await?;

        let status_logs = Self::status_logs(pool, donation.id).await?;

        Ok(DonationDetails {
            donation,
            donor_name,
            items,
            status_logs,
        })
    }
}
