//! Venue repository
//!
//! - create/update/delete: one transaction each
//! - list_by_area: LEFT JOIN show count, sorted for area grouping
//! - search: ILIKE substring match with show count

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool, Row};

use crate::models::listing::contains_pattern;
use crate::models::{AreaVenue, RecordSummary, VenueFields};
use super::DbError;

/// Venue record from database
#[derive(Debug, Clone, FromRow)]
pub struct Venue {
    pub id: i64,
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

/// A show at this venue, joined with its artist
#[derive(Debug, Clone, FromRow)]
pub struct VenueShow {
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Venue repository
pub struct VenueRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> VenueRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a venue and return it with its generated id.
    pub async fn create(&self, fields: &VenueFields) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let venue: Venue = sqlx::query_as(
            r#"
            INSERT INTO venues (
                name, city, state, address, phone, image_link, facebook_link,
                genres, website_link, seeking_talent, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&fields.name)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.address)
        .bind(fields.phone.as_deref())
        .bind(fields.image_link.as_deref())
        .bind(fields.facebook_link.as_deref())
        .bind(fields.genres.as_slice())
        .bind(fields.website_link.as_deref())
        .bind(fields.seeking_talent)
        .bind(fields.seeking_description.as_deref())
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(venue)
    }

    /// Overwrite every mutable column of an existing venue.
    pub async fn update(&self, id: i64, fields: &VenueFields) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let venue: Venue = sqlx::query_as(
            r#"
            UPDATE venues SET
                name = $2,
                city = $3,
                state = $4,
                address = $5,
                phone = $6,
                image_link = $7,
                facebook_link = $8,
                genres = $9,
                website_link = $10,
                seeking_talent = $11,
                seeking_description = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&fields.name)
        .bind(&fields.city)
        .bind(&fields.state)
        .bind(&fields.address)
        .bind(fields.phone.as_deref())
        .bind(fields.image_link.as_deref())
        .bind(fields.facebook_link.as_deref())
        .bind(fields.genres.as_slice())
        .bind(fields.website_link.as_deref())
        .bind(fields.seeking_talent)
        .bind(fields.seeking_description.as_deref())
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("venue", id))?;

        tx.commit().await?;
        Ok(venue)
    }

    /// Delete a venue and, through the foreign key, its shows.
    ///
    /// Returns the deleted record.
    pub async fn delete(&self, id: i64) -> Result<Venue, DbError> {
        let mut tx = self.pool.begin().await?;

        let venue: Venue = sqlx::query_as("DELETE FROM venues WHERE id = $1 RETURNING *")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| DbError::not_found("venue", id))?;

        tx.commit().await?;
        Ok(venue)
    }

    /// Get a single venue by id.
    pub async fn get(&self, id: i64) -> Result<Venue, DbError> {
        sqlx::query_as::<_, Venue>("SELECT * FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::not_found("venue", id))
    }

    /// All venues with show counts, ordered by (city, name, state).
    ///
    /// The count covers every show at the venue, past ones included.
    pub async fn list_by_area(&self) -> Result<Vec<AreaVenue>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                v.id,
                v.name,
                v.city,
                v.state,
                COUNT(s.id) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            GROUP BY v.id
            ORDER BY v.city, v.name, v.state, v.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| AreaVenue {
                id: r.get("id"),
                name: r.get("name"),
                city: r.get("city"),
                state: r.get("state"),
                num_upcoming_shows: r.get("num_upcoming_shows"),
            })
            .collect())
    }

    /// Case-insensitive substring search on the venue name.
    pub async fn search(&self, term: &str) -> Result<Vec<RecordSummary>, DbError> {
        let rows = sqlx::query(
            r#"
            SELECT
                v.id,
                v.name,
                COUNT(s.id) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            WHERE v.name ILIKE $1 ESCAPE '\'
            GROUP BY v.id
            ORDER BY v.name, v.id
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

    /// Shows at a venue, each joined with its artist, by start time.
    pub async fn shows(&self, id: i64) -> Result<Vec<VenueShow>, DbError> {
        let shows = sqlx::query_as::<_, VenueShow>(
            r#"
            SELECT
                a.id AS artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = $1
            ORDER BY s.start_time, s.id
            "#,
        )
        .bind(id)
        .fetch_all(self.pool)
        .await?;

        Ok(shows)
    }
}
