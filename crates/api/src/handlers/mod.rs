//! Request handlers, one submodule per resource.
//!
//! Handlers stay thin: they parse and authorize the request, delegate to
//! `tulong_core` for domain rules and `tulong_db` for persistence, and map
//! failures via [`AppError`](crate::error::AppError).

pub mod auth;
pub mod barangays;
pub mod catalog;
pub mod donations;
pub mod reports;
pub mod requests;
