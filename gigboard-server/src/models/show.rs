//! Show form: links one venue and one artist at a start time

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::schedule::{format_start_time, is_storable, parse_start_time};
use super::ValidationError;

/// Show form as submitted by the client
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowForm {
    pub artist_id: Option<i64>,
    pub venue_id: Option<i64>,
    /// `YYYY-MM-DD HH:MM:SS` (UTC) or RFC 3339; blank means "now"
    pub start_time: Option<String>,
}

/// Validated show columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowFields {
    pub artist_id: i64,
    pub venue_id: i64,
    /// `None` lets the database stamp the creation time
    pub start_time: Option<DateTime<Utc>>,
}

impl ShowForm {
    /// Blank form, start time pre-filled with `now`.
    pub fn blank(now: DateTime<Utc>) -> Self {
        Self {
            artist_id: None,
            venue_id: None,
            start_time: Some(format_start_time(now)),
        }
    }

    /// Validate the submission, stopping at the first invalid field.
    pub fn validate(&self) -> Result<ShowFields, ValidationError> {
        let artist_id = record_id("artist_id", self.artist_id)?;
        let venue_id = record_id("venue_id", self.venue_id)?;

        let start_time = match self.start_time.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => {
                let at = parse_start_time(raw).ok_or(ValidationError::InvalidFormat {
                    field: "start_time",
                    reason: "expected YYYY-MM-DD HH:MM:SS or an RFC 3339 timestamp",
                })?;
                if !is_storable(at) {
                    return Err(ValidationError::InvalidFormat {
                        field: "start_time",
                        reason: "year is outside the supported range",
                    });
                }
                Some(at)
            }
        };

        Ok(ShowFields {
            artist_id,
            venue_id,
            start_time,
        })
    }
}

fn record_id(field: &'static str, id: Option<i64>) -> Result<i64, ValidationError> {
    match id {
        None => Err(ValidationError::Empty { field }),
        Some(id) if id < 1 => Err(ValidationError::InvalidFormat {
            field,
            reason: "must be a positive id",
        }),
        Some(id) => Ok(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn valid_form() {
        let form = ShowForm {
            artist_id: Some(4),
            venue_id: Some(1),
            start_time: Some("2019-05-21 21:30:00".into()),
        };
        let fields = form.validate().unwrap();
        assert_eq!(fields.venue_id, 1);
        assert_eq!(
            fields.start_time,
            Some(Utc.with_ymd_and_hms(2019, 5, 21, 21, 30, 0).unwrap())
        );
    }

    #[test]
    fn blank_start_time_defers_to_database() {
        let form = ShowForm {
            artist_id: Some(4),
            venue_id: Some(1),
            start_time: Some("   ".into()),
        };
        assert_eq!(form.validate().unwrap().start_time, None);
    }

    #[test]
    fn ids_are_required_and_positive() {
        let form = ShowForm {
            artist_id: None,
            venue_id: Some(1),
            start_time: None,
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::Empty { field: "artist_id" }
        );

        let form = ShowForm {
            artist_id: Some(1),
            venue_id: Some(0),
            start_time: None,
        };
        assert!(matches!(
            form.validate().unwrap_err(),
            ValidationError::InvalidFormat { field: "venue_id", .. }
        ));
    }

    #[test]
    fn unstorable_year_is_rejected() {
        let form = ShowForm {
            artist_id: Some(1),
            venue_id: Some(1),
            start_time: Some("-9999-01-01 00:00:00".into()),
        };
        assert_eq!(
            form.validate().unwrap_err(),
            ValidationError::InvalidFormat {
                field: "start_time",
                reason: "year is outside the supported range",
            }
        );
    }

    #[test]
    fn unparseable_start_time() {
        let form = ShowForm {
            artist_id: Some(1),
            venue_id: Some(1),
            start_time: Some("tomorrow night".into()),
        };
        assert!(matches!(
            form.validate().unwrap_err(),
            ValidationError::InvalidFormat { field: "start_time", .. }
        ));
    }

    #[test]
    fn blank_form_prefills_now() {
        let now = Utc.with_ymd_and_hms(2030, 1, 2, 3, 4, 5).unwrap();
        let form = ShowForm::blank(now);
        assert_eq!(form.start_time.as_deref(), Some("2030-01-02 03:04:05"));
        assert_eq!(form.venue_id, None);
    }
}
