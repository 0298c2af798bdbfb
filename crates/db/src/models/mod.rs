//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - DTOs for inserts and for API-facing projections

pub mod account;
pub mod barangay;
pub mod donation;
pub mod recipient_request;
pub mod role;
pub mod session;
