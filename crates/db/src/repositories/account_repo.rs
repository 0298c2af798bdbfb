//! Repository for the `accounts` table.

use sqlx::PgPool;
use tulong_core::types::{DbId, Timestamp};

use crate::models::account::{Account, CreateAccount};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, org_name, contact_number, email, address, password_hash, \
                        role_id, barangay_id, is_active, last_login_at, failed_login_count, \
                        locked_until, created_at, updated_at";

/// Provides CRUD operations for accounts.
pub struct AccountRepo;

impl AccountRepo {
    /// Insert a new account, returning the created row.
    pub async fn create(pool: &PgPool, input: &CreateAccount) -> Result<Account, sqlx::Error> {
        let query = format!(
            "INSERT INTO accounts \
                (name, org_name, contact_number, email, address, password_hash, role_id, barangay_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Account>(&query)
            .bind(&input.name)
            .bind(&input.org_name)
            .bind(&input.contact_number)
            .bind(&input.email)
            .bind(&input.address)
            .bind(&input.password_hash)
            .bind(input.role_id)
            .bind(input.barangay_id)
            .fetch_one(pool)
            .await
    }

    /// Find an account by internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE id = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find an account by its contact number, the login identifier.
    pub async fn find_by_contact_number(
        pool: &PgPool,
        contact_number: &str,
    ) -> Result<Option<Account>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM accounts WHERE contact_number = $1");
        sqlx::query_as::<_, Account>(&query)
            .bind(contact_number)
            .fetch_optional(pool)
            .await
    }

    /// Increment the failed login counter by 1.
    pub async fn increment_failed_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts SET failed_login_count = failed_login_count + 1 WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Lock an account until the specified timestamp.
    pub async fn lock_account(
        pool: &PgPool,
        id: DbId,
        until: Timestamp,
    ) -> Result<(), sqlx::Error> {
        sqlx::query("UPDATE accounts SET locked_until = $2 WHERE id = $1")
            .bind(id)
            .bind(until)
            .execute(pool)
            .await?;
        Ok(())
    }

    /// Record a successful login: reset `failed_login_count` to 0, clear
    /// `locked_until`, and set `last_login_at` to now.
    pub async fn record_successful_login(pool: &PgPool, id: DbId) -> Result<(), sqlx::Error> {
        sqlx::query(
            "UPDATE accounts SET
                failed_login_count = 0,
                locked_until = NULL,
                last_login_at = NOW()
             WHERE id = $1",
        )
        .bind(id)
        .execute(pool)
        .await?;
        Ok(())
    }

    /// Deactivate an account. Deactivated accounts fail login and refresh.
    /// Returns false when the id does not exist.
    pub async fn deactivate(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE accounts SET is_active = FALSE WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
