//! Account entity model and DTOs (PRD-01).
//!
//! Donors and administrators share one table, distinguished by role.
//! Barangay-level administrators additionally carry a `barangay_id`, which
//! scopes their request listing and counters.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use tulong_core::types::{DbId, Timestamp};

/// Full account row from the `accounts` table.
///
/// Contains the password hash -- NEVER serialize this to API responses
/// directly. Use [`AccountResponse`] for external-facing output.
#[derive(Debug, Clone, FromRow)]
pub struct Account {
    pub id: DbId,
    pub name: String,
    pub org_name: Option<String>,
    pub contact_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub password_hash: String,
    pub role_id: DbId,
    pub barangay_id: Option<DbId>,
    pub is_active: bool,
    pub last_login_at: Option<Timestamp>,
    pub failed_login_count: i32,
    pub locked_until: Option<Timestamp>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Safe account representation for API responses (no password hash).
#[derive(Debug, Clone, Serialize)]
pub struct AccountResponse {
    pub id: DbId,
    pub name: String,
    pub org_name: Option<String>,
    pub contact_number: String,
    pub email: Option<String>,
    /// Resolved role name (e.g. `"admin"`, `"donor"`).
    pub role: String,
    pub barangay_id: Option<DbId>,
    pub created_at: Timestamp,
}

impl AccountResponse {
    /// Build the response projection from a full row plus its resolved role.
    pub fn from_account(account: &Account, role: String) -> Self {
        Self {
            id: account.id,
            name: account.name.clone(),
            org_name: account.org_name.clone(),
            contact_number: account.contact_number.clone(),
            email: account.email.clone(),
            role,
            barangay_id: account.barangay_id,
            created_at: account.created_at,
        }
    }
}

/// DTO for creating a new account.
#[derive(Debug, Deserialize)]
pub struct CreateAccount {
    pub name: String,
    pub org_name: Option<String>,
    pub contact_number: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub password_hash: String,
    pub role_id: DbId,
    pub barangay_id: Option<DbId>,
}
