//! Artist form and its validated field set

use serde::{Deserialize, Serialize};

use super::validation::{optional_phone, optional_text, optional_url, required_text};
use super::venue::{MAX_FIELD_LEN, MAX_LONG_FIELD_LEN, MAX_NAME_LEN};
use super::{Genres, ValidationError};

/// Artist form as submitted by the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArtistForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Vec<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

/// Every mutable artist column, validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtistFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub phone: Option<String>,
    pub genres: Genres,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub website_link: Option<String>,
    pub seeking_venue: bool,
    pub seeking_description: Option<String>,
}

impl ArtistForm {
    /// Validate the submission, stopping at the first invalid field.
    pub fn validate(&self) -> Result<ArtistFields, ValidationError> {
        Ok(ArtistFields {
            name: required_text("name", &self.name, MAX_NAME_LEN)?,
            city: required_text("city", &self.city, MAX_FIELD_LEN)?,
            state: required_text("state", &self.state, MAX_FIELD_LEN)?,
            phone: optional_phone("phone", self.phone.as_deref(), MAX_FIELD_LEN)?,
            genres: Genres::new(&self.genres)?,
            image_link: optional_url("image_link", self.image_link.as_deref(), MAX_LONG_FIELD_LEN)?,
            facebook_link: optional_url("facebook_link", self.facebook_link.as_deref(), MAX_FIELD_LEN)?,
            website_link: optional_url("website_link", self.website_link.as_deref(), MAX_FIELD_LEN)?,
            seeking_venue: self.seeking_venue,
            seeking_description: optional_text(
                "seeking_description",
                self.seeking_description.as_deref(),
                MAX_LONG_FIELD_LEN,
            )?,
        })
    }
}
