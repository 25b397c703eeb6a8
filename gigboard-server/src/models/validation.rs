//! Validation error types and field checks shared by the venue, artist and
//! show forms

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

/// Loose http(s) URL check: scheme, host, no whitespace
static URL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("invalid url regex"));

/// Phone numbers: digits plus common separators, at least 7 characters
static PHONE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\+?[0-9 ()./-]{7,}$").expect("invalid phone regex"));

/// Validation error for domain models
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Field is empty when it shouldn't be
    Empty { field: &'static str },

    /// Field exceeds maximum length
    TooLong { field: &'static str, max: usize },

    /// String doesn't match required format (e.g., URL)
    InvalidFormat { field: &'static str, reason: &'static str },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty { field } => write!(f, "{} cannot be empty", field),
            Self::TooLong { field, max } => {
                write!(f, "{} exceeds maximum length of {} characters", field, max)
            }
            Self::InvalidFormat { field, reason } => {
                write!(f, "{}: {}", field, reason)
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Trim a required text field and enforce its maximum length.
pub fn required_text(
    field: &'static str,
    value: &str,
    max: usize,
) -> Result<String, ValidationError> {
    let trimmed = value.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::Empty { field });
    }

    if trimmed.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }

    Ok(trimmed.to_owned())
}

/// Trim an optional text field. Blank input becomes `None`.
pub fn optional_text(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Ok(None),
        Some(v) if v.chars().count() > max => Err(ValidationError::TooLong { field, max }),
        Some(v) => Ok(Some(v.to_owned())),
    }
}

/// Optional link field; must be an http(s) URL when present.
pub fn optional_url(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let url = optional_text(field, value, max)?;
    if let Some(url) = &url {
        if !URL_RE.is_match(url) {
            return Err(ValidationError::InvalidFormat {
                field,
                reason: "must be an http:// or https:// URL",
            });
        }
    }
    Ok(url)
}

/// Optional phone number field.
pub fn optional_phone(
    field: &'static str,
    value: Option<&str>,
    max: usize,
) -> Result<Option<String>, ValidationError> {
    let phone = optional_text(field, value, max)?;
    if let Some(phone) = &phone {
        if !PHONE_RE.is_match(phone) || !phone.chars().any(|c| c.is_ascii_digit()) {
            return Err(ValidationError::InvalidFormat {
                field,
                reason: "must contain digits, optionally with spaces and + - ( ) . /",
            });
        }
    }
    Ok(phone)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn phone_needs_a_digit() {
        assert!(matches!(
            optional_phone("phone", Some("......."), 120),
            Err(ValidationError::InvalidFormat { field: "phone", .. })
        ));
        assert_eq!(
            optional_phone("phone", Some("(415) 555-0100"), 120).unwrap(),
            Some("(415) 555-0100".to_owned())
        );
    }

    #[test]
    fn error_display() {
        let err = ValidationError::TooLong {
            field: "city",
            max: 120,
        };
        assert_eq!(
            err.to_string(),
            "city exceeds maximum length of 120 characters"
        );
    }

    #[test]
    fn required_trims_and_rejects_blank() {
        assert_eq!(required_text("name", "  The Hop ", 256).unwrap(), "The Hop");
        assert_eq!(
            required_text("name", "   ", 256).unwrap_err(),
            ValidationError::Empty { field: "name" }
        );
    }

    #[test]
    fn required_counts_chars_not_bytes() {
        // 120 two-byte characters still fit in a 120 limit
        let city = "é".repeat(120);
        assert!(required_text("city", &city, 120).is_ok());
        let city = "é".repeat(121);
        assert!(matches!(
            required_text("city", &city, 120).unwrap_err(),
            ValidationError::TooLong { max: 120, .. }
        ));
    }

    #[test]
    fn optional_blank_is_none() {
        assert_eq!(optional_text("phone", None, 120).unwrap(), None);
        assert_eq!(optional_text("phone", Some("  "), 120).unwrap(), None);
        assert_eq!(
            optional_text("phone", Some(" x "), 120).unwrap(),
            Some("x".to_owned())
        );
    }

    #[test]
    fn urls() {
        assert!(optional_url("website_link", Some("https://themusicalhop.com"), 120).is_ok());
        assert!(optional_url("website_link", Some("http://a.b/c?d=e"), 120).is_ok());
        assert!(matches!(
            optional_url("website_link", Some("themusicalhop.com"), 120).unwrap_err(),
            ValidationError::InvalidFormat { .. }
        ));
        assert!(optional_url("website_link", Some("https://has space.com"), 120).is_err());
    }

    #[test]
    fn phones() {
        assert!(optional_phone("phone", Some("123-123-1234"), 120).is_ok());
        assert!(optional_phone("phone", Some("+1 (415) 000-1234"), 120).is_ok());
        assert!(optional_phone("phone", Some("call me"), 120).is_err());
        assert!(optional_phone("phone", Some("12"), 120).is_err());
    }
}
