//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for list operations (no N+1)
//! - Lets the database enforce uniqueness and referential integrity,
//!   translating constraint violations into typed errors
//! - "Upcoming" is evaluated against a timestamp the caller passes in,
//!   so tests can pin the clock

pub mod artists;
pub mod shows;
pub mod venues;

pub use artists::ArtistRepo;
pub use shows::ShowRepo;
pub use venues::VenueRepo;

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },

    /// Unique or referential constraint rejected the mutation
    #[error("conflict: {detail}")]
    Conflict { detail: String },

    /// Insert referenced a row that does not exist
    #[error("invalid reference: {detail}")]
    ForeignKey { detail: String },
}

/// Postgres error code for unique_violation
const UNIQUE_VIOLATION: &str = "23505";

/// Postgres error code for foreign_key_violation
const FK_VIOLATION: &str = "23503";

pub(crate) fn is_unique_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == UNIQUE_VIOLATION)
}

pub(crate) fn is_fk_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .and_then(|db| db.code())
        .is_some_and(|code| code == FK_VIOLATION)
}
