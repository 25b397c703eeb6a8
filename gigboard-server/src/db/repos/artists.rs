//! Artist repository
//!
//! Mirrors the venue repository; the listing is flat (by name) rather than
//! grouped by area.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};

use crate::models::listing::contains_pattern;
use crate::models::{ArtistFields, RecordSummary};
use super::DbError;

/// Artist record from database
#[derive(Debug, Clone, FromRow)]
pub struct Artist {
    pub id: i64,
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

/// Id and name only, for the artist listing
#[derive(Debug, Clone, FromRow)]
pub struct ArtistName {
    pub id: i64,
    pub name: String,
}

/// A show by this artist, joined with its venue
#[derive(Debug, Clone, FromRow)]
pub struct ArtistShow {
    pub venue_id: i64,
    pub venue_name: String,
    pub venue_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Artist repository
pub struct ArtistRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an artist and return it with its generated id.
    pub async fn create(&self, fields: &ArtistFields) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let artist: Artist = sqlx::query_as(
            r#"
            INSERT INTO artists (
                name, city, state, phone, genres, image_link, facebook_link,
                website_link, seeking_venue, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(fields.phone.as_deref())
        .bind(fields.genres.as_slice())
        .bind(fields.image_link.as_deref())
        .bind(fields.facebook_link.as_deref())
        .bind(fields.website_link.as_deref())
        .bind(fields.seeking_venue)
        .bind(fields.seeking_description.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(artist)
    }

    /// Overwrite every mutable column of an existing artist.
    pub async fn update(&self, id: i64, fields: &ArtistFields) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let artist: Artist = sqlx::query_as(
            r#"
            UPDATE artists SET
                name = $2,
                city = $3,
                state = $4,
                phone = $5,
                genres = $6,
                image_link = $7,
                facebook_link = $8,
                website_link = $9,
                seeking_venue = $10,
                seeking_description = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(fields.phone.as_deref())
        .bind(fields.genres.as_slice())
        .bind(fields.image_link.as_deref())
        .bind(fields.facebook_link.as_deref())
        .bind(fields.website_link.as_deref())
        .bind(fields.seeking_venue)
        .bind(fields.seeking_description.as_deref())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("artist", id))?;

        tx.commit().await?;
        Ok(artist)
    }

    /// Delete an artist and, through the foreign key, their shows.
    pub async fn delete(&self, id: i64) -> Result<Artist, DbError> {
        let mut tx = self.pool.begin().await?;

        let artist: Artist = sqlx::query_as("DELETE FROM artists WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("artist", id))?;

        tx.commit().await?;
        Ok(artist)
    }

    /// Get a single artist by id.
    pub async fn get(&self, id: i64) -> Result<Artist, DbError> {
        sqlx::query_as::<_, Artist>("SELECT * FROM artists WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("artist", id))
    }

    /// All artists ordered by name.
    pub async fn list(&self) -> Result<Vec<ArtistName>, DbError> {
        let artists = sqlx::query_as::<_, ArtistName>(
            "SELECT id, name FROM artists ORDER BY name, id",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(artists)
    }

    /// Case-insensitive substring search on the artist name.
    pub async fn search(&self, term: &str) -> Result<Vec<RecordSummary>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                a.id,
                a.name,
                COUNT(s.id) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            WHERE a.name ILIKE $1 ESCAPE '\'
            GROUP BY a.id
            ORDER BY a.name, a.id
            "#,
        )
        .bind(contains_pattern(term))
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| RecordSummary {
                id: r.get("id"),
                name: r.get("name"),
                num_upcoming_shows: r.get("num_upcoming_shows"),
            })
            .collect())
    }

    /// Shows by an artist, each joined with its venue, by start time.
    pub async fn shows(&self, id: i64) -> Result<Vec<ArtistShow>, DbError> {
        let shows = sqlx::query_as::<_, ArtistShow>(
            r#"
            SELECT
                v.id AS venue_id,
                v.name AS venue_name,
                v.image_link AS venue_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(shows)
    }
}
