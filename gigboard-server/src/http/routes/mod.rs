//! Route handlers organized by resource

use serde::{Deserialize, Serialize};

use crate::models::venue::MAX_NAME_LEN;
use crate::models::{SearchResults, ValidationError};

pub mod health;
pub mod home;
pub mod venues;
pub mod artists;
pub mod shows;

/// Search form shared by venues and artists
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub search_term: String,
}

impl SearchForm {
    /// The trimmed term; empty matches every record.
    pub fn term(&self) -> Result<&str, ValidationError> {
        let term = self.search_term.trim();
        if term.chars().count() > MAX_NAME_LEN {
            return Err(ValidationError::TooLong {
                field: "search_term",
                max: MAX_NAME_LEN,
            });
        }
        Ok(term)
    }
}

/// Search results echoed with the term that produced them
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub search_term: String,
    pub results: SearchResults,
}

/// Existing record loaded into its form for editing
#[derive(Debug, Serialize)]
pub struct EditView<F> {
    pub id: i64,
    pub form: F,
}
