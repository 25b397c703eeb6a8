//! Show repository
//!
//! A show only exists between an existing venue and an existing artist.
//! Creation checks both inside its transaction; the foreign keys back that
//! up against concurrent deletes.

use chrono::{DateTime, Utc};
use sqlx::{FromRow, PgPool};

use crate::models::ShowFields;
use super::DbError;

/// Show record from database
#[derive(Debug, Clone, FromRow)]
pub struct Show {
    pub id: i64,
    pub venue_id: i64,
    pub artist_id: i64,
    pub start_time: DateTime<Utc>,
}

/// Show joined with both its venue and its artist
#[derive(Debug, Clone, FromRow)]
pub struct ShowListing {
    pub id: i64,
    pub venue_id: i64,
    pub venue_name: String,
    pub artist_id: i64,
    pub artist_name: String,
    pub artist_image_link: Option<String>,
    pub start_time: DateTime<Utc>,
}

/// Show repository
pub struct ShowRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ShowRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Schedule a show (atomic).
    ///
    /// Fails with NotFound for a missing venue or artist, in which case
    /// nothing is written.
    pub async fn create(&self, fields: &ShowFields) -> Result<Show, DbError> {
        let mut tx = self.pool.begin().await?;

        // Verify both ends exist
        let venue_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM venues WHERE id = $1)")
                .bind(fields.venue_id)
                .fetch_one(&mut *tx)
                .await?;
        if !venue_exists.0 {
            return Err(DbError::not_found("venue", fields.venue_id));
        }

        let artist_exists: (bool,) =
            sqlx::query_as("SELECT EXISTS(SELECT 1 FROM artists WHERE id = $1)")
                .bind(fields.artist_id)
                .fetch_one(&mut *tx)
                .await?;
        if !artist_exists.0 {
            return Err(DbError::not_found("artist", fields.artist_id));
        }

        // NULL start time falls back to the creation time
        let show: Show = sqlx::query_as(
            r#"
            INSERT INTO shows (venue_id, artist_id, start_time)
            VALUES ($1, $2, COALESCE($3, NOW()))
            RETURNING id, venue_id, artist_id, start_time
            "#,
        )
        .bind(fields.venue_id)
        .bind(fields.artist_id)
        .bind(fields.start_time)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(show)
    }

    /// Delete a single show.
    pub async fn delete(&self, id: i64) -> Result<Show, DbError> {
        let mut tx = self.pool.begin().await?;

        let show: Show = sqlx::query_as(
            "DELETE FROM shows WHERE id = $1 RETURNING id, venue_id, artist_id, start_time",
        )
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("show", id))?;

        tx.commit().await?;
        Ok(show)
    }

    /// Get a single show by id.
    pub async fn get(&self, id: i64) -> Result<Show, DbError> {
        sqlx::query_as::<_, Show>(
            "SELECT id, venue_id, artist_id, start_time FROM shows WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or_else(|| DbError::not_found("show", id))
    }

    /// Every show with venue and artist names, by start time.
    pub async fn list(&self) -> Result<Vec<ShowListing>, DbError> {
        let shows = sqlx::query_as::<_, ShowListing>(
            r#"
            SELECT
                s.id,
                s.venue_id,
                v.name AS venue_name,
                s.artist_id,
                a.name AS artist_name,
                a.image_link AS artist_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            ORDER BY s.start_time, s.id
            "#,
        )
        .fetch_all(self.pool)
        .await?;

        Ok(shows)
    }
}
