//! Pure domain logic for the tulong relief coordination backend.
//!
//! Everything in this crate is deterministic and free of I/O: catalogs,
//! validation, the donation status lifecycle, intake normalization, and the
//! analytics aggregations. The `db` and `api` crates depend on this crate,
//! never the other way around.

pub mod aggregate;
pub mod calamity;
pub mod error;
pub mod necessity;
pub mod roles;
pub mod status;
pub mod submission;
pub mod types;
