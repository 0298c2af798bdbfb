//! Barangay reference model.
//!
//! Immutable seed data; the intake form and request listing read it, nothing
//! writes it at runtime.

use serde::Serialize;
use sqlx::FromRow;
use tulong_core::types::DbId;

/// A barangay row from the `barangays` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Barangay {
    pub id: DbId,
    pub name: String,
}
