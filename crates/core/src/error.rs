//! Domain error type shared by every crate in the workspace.
//!
//! `CoreError` carries enough structure for the API layer to map each failure
//! onto an HTTP status without string matching.

use crate::status::DonationStatus;
use crate::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("Unknown barangay: {id}")]
    UnknownBarangay { id: DbId },

    #[error("Invalid status transition: {from} to {to}")]
    InvalidTransition {
        from: DonationStatus,
        to: DonationStatus,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}
