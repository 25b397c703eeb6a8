//! Repository implementations for database access
//!
//! Each repository follows these patterns:
//! - Uses JOINs for show counts and counterparts (no N+1)
//! - Every mutation runs in its own transaction; an early return drops the
//!   transaction, which rolls it back
//! - NotFound is reported from the statement result, not a prior check

pub mod venues;
pub mod artists;
pub mod shows;

pub use venues::{VenueRepo, Venue, VenueShow};
pub use artists::{ArtistRepo, Artist, ArtistName, ArtistShow};
pub use shows::{ShowRepo, Show, ShowListing};

/// Database error type
#[derive(Debug, thiserror::Error)]
pub enum DbError {
    #[error("database error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("not found: {resource} '{id}'")]
    NotFound { resource: &'static str, id: String },
}

impl DbError {
    pub(crate) fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_display() {
        let err = DbError::not_found("venue", 42);
        assert_eq!(err.to_string(), "not found: venue '42'");
    }
}
