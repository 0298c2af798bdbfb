//! Repository for the `barangays` reference table.

use sqlx::PgPool;
use tulong_core::types::DbId;

use crate::models::barangay::Barangay;

/// Provides read operations for barangays. The table is seed data; nothing
/// writes it at runtime.
pub struct BarangayRepo;

impl BarangayRepo {
    /// List all barangays in alphabetical order.
    pub async fn list(pool: &PgPool) -> Result<Vec<Barangay>, sqlx::Error> {
        sqlx::query_as::<_, Barangay>("SELECT id, name FROM barangays ORDER BY name ASC")
            .fetch_all(pool)
            .await
    }

    /// Find a barangay by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Barangay>, sqlx::Error> {
        sqlx::query_as::<_, Barangay>("SELECT id, name FROM barangays WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a barangay by its exact name.
    pub async fn find_by_name(pool: &PgPool, name: &str) -> Result<Option<Barangay>, sqlx::Error> {
        sqlx::query_as::<_, Barangay>("SELECT id, name FROM barangays WHERE name = $1")
            .bind(name)
            .fetch_optional(pool)
            .await
    }
}
