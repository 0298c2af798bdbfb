//! Authentication and authorization middleware extractors.
//!
//! - [`auth::AuthUser`] -- Extracts the authenticated account from a JWT Bearer token.
//! - [`rbac::RequireAdmin`] -- Requires the `admin` role.
//! - [`rbac::RequireDonor`] -- Requires the `donor` role.
//! - [`rbac::RequireAuth`] -- Requires any authenticated account.

pub mod auth;
pub mod rbac;
