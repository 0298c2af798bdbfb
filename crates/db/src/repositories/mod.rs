//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod account_repo;
pub mod barangay_repo;
pub mod donation_repo;
pub mod recipient_request_repo;
pub mod role_repo;
pub mod session_repo;

pub use account_repo::AccountRepo;
pub use barangay_repo::BarangayRepo;
pub use donation_repo::DonationRepo;
pub use recipient_request_repo::RecipientRequestRepo;
pub use role_repo::RoleRepo;
pub use session_repo::SessionRepo;
