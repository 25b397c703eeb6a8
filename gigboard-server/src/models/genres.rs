//! Genre list validation

use super::ValidationError;

/// Maximum length of a single genre label (matches the column width)
const MAX_GENRE_LEN: usize = 120;

/// Validated, non-empty list of genre labels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Genres(Vec<String>);

impl Genres {
    /// Create a genre list.
    ///
    /// # Rules
    /// - At least one genre
    /// - Each genre trimmed, non-empty, max 120 characters
    /// - Duplicates (case-insensitive) dropped, first spelling wins
    ///
    /// # Example
    /// ```
    /// use gigboard_server::models::Genres;
    ///
    /// let genres = Genres::new(["Jazz", " jazz ", "Folk"]).unwrap();
    /// assert_eq!(genres.as_slice(), ["Jazz", "Folk"]);
    /// assert!(Genres::new(Vec::<String>::new()).is_err());
    /// ```
    pub fn new<I, S>(values: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut genres: Vec<String> = Vec::new();
        let mut seen: Vec<String> = Vec::new();

        for value in values {
            let genre = value.as_ref().trim();
            if genre.is_empty() {
                return Err(ValidationError::Empty { field: "genre" });
            }
            if genre.chars().count() > MAX_GENRE_LEN {
                return Err(ValidationError::TooLong {
                    field: "genre",
                    max: MAX_GENRE_LEN,
                });
            }
            let folded = genre.to_lowercase();
            if !seen.contains(&folded) {
                seen.push(folded);
                genres.push(genre.to_owned());
            }
        }

        if genres.is_empty() {
            return Err(ValidationError::Empty { field: "genres" });
        }

        Ok(Self(genres))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}
