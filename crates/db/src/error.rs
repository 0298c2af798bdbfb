//! Error type for repositories that mix domain validation with SQL.
//!
//! Most repositories return plain `sqlx::Error`. Status transitions also
//! enforce lifecycle rules, so they need both failure families.

use tulong_core::error::CoreError;

#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error(transparent)]
    Core(#[from] CoreError),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}
