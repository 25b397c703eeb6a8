//! Venue form and its validated field set

use serde::{Deserialize, Serialize};

use super::validation::{optional_phone, optional_text, optional_url, required_text};
use super::{Genres, ValidationError};

pub(crate) const MAX_NAME_LEN: usize = 256;
pub(crate) const MAX_FIELD_LEN: usize = 120;
pub(crate) const MAX_LONG_FIELD_LEN: usize = 500;

/// Venue form as submitted by the client.
///
/// Every field defaults, so a partially filled form reaches validation
/// instead of failing to deserialize.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VenueForm {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Vec<String>,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

/// Every mutable venue column, validated.
///
/// Used for both insert and full-record update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueFields {
    pub name: String,
    pub city: String,
    pub state: String,
    pub address: String,
    pub phone: Option<String>,
    pub image_link: Option<String>,
    pub facebook_link: Option<String>,
    pub genres: Genres,
    pub website_link: Option<String>,
    pub seeking_talent: bool,
    pub seeking_description: Option<String>,
}

impl VenueForm {
    /// Validate the submission, stopping at the first invalid field.
    pub fn validate(&self) -> Result<VenueFields, ValidationError> {
        Ok(VenueFields {
            name: required_text("name", &self.name, MAX_NAME_LEN)?,
            city: required_text("city", &self.city, MAX_FIELD_LEN)?,
            state: required_text("state", &self.state, MAX_FIELD_LEN)?,
            address: required_text("address", &self.address, MAX_FIELD_LEN)?,
            phone: optional_phone("phone", self.phone.as_deref(), MAX_FIELD_LEN)?,
            image_link: optional_url("image_link", self.image_link.as_deref(), MAX_LONG_FIELD_LEN)?,
            facebook_link: optional_url("facebook_link", self.facebook_link.as_deref(), MAX_FIELD_LEN)?,
            genres: Genres::new(&self.genres)?,
            website_link: optional_url("website_link", self.website_link.as_deref(), MAX_FIELD_LEN)?,
            seeking_talent: self.seeking_talent,
            seeking_description: optional_text(
                "seeking_description",
                self.seeking_description.as_deref(),
                MAX_LONG_FIELD_LEN,
            )?,
        })
    }
}
