//! Donation entity models and DTOs (PRD-03).

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tulong_core::types::{DbId, Timestamp};

/// A donation row from the `donations` table.
///
/// `status` holds the stored form of `DonationStatus`; it only ever changes
/// through `DonationRepo::transition_status`.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Donation {
    pub id: DbId,
    pub control_number: String,
    pub request_id: DbId,
    pub donor_id: Option<DbId>,
    pub status: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A pledged line item belonging to a donation.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct DonationItem {
    pub id: DbId,
    pub donation_id: DbId,
    pub item_name: String,
    pub quantity: i32,
}

/// One entry in a donation's append-only status history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct StatusLog {
    pub id: DbId,
    pub donation_id: DbId,
    pub status: String,
    pub remarks: String,
    pub logged_at: Timestamp,
}

/// Line item as submitted by the donor when pledging.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDonationItem {
    pub item_name: String,
    pub quantity: i32,
}

/// DTO for creating a donation pledge.
#[derive(Debug)]
pub struct CreateDonation {
    pub request_id: DbId,
    pub donor_id: Option<DbId>,
    pub control_number: String,
    pub items: Vec<NewDonationItem>,
}

/// Donation enriched with its items, status history, and donor name.
#[derive(Debug, Clone, Serialize)]
pub struct DonationDetails {
    pub donation: Donation,
    pub donor_name: Option<String>,
    pub items: Vec<DonationItem>,
    pub status_logs: Vec<StatusLog>,
}

/// An aid request together with every donation pledged against it.
/// This is the row shape of the admin processing view.
#[derive(Debug, Clone, Serialize)]
pub struct RequestDonations {
    pub request: crate::models::recipient_request::RequestSummary,
    pub donations: Vec<DonationDetails>,
}
