//! Schema for venues, artists and shows
//!
//! Idempotent: every statement is `IF NOT EXISTS`, so it runs on each
//! startup. The whole run is one transaction holding an advisory lock, so
//! concurrent runs (several instances, parallel tests) queue up instead of
//! racing on the catalog.

use sqlx::{PgConnection, PgPool};

use super::DbError;

/// Advisory lock key for schema migrations
const MIGRATION_LOCK_KEY: i64 = 0x6769_6762_6f61_7264;

/// Create tables and indexes if they are missing
pub async fn run(pool: &PgPool) -> Result<(), DbError> {
    tracing::info!("Running schema migrations...");

    let mut tx = pool.begin().await?;
    sqlx::query("SELECT pg_advisory_xact_lock($1)")
        .bind(MIGRATION_LOCK_KEY)
        .execute(&mut *tx)
        .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            city VARCHAR(120) NOT NULL,
            state VARCHAR(120) NOT NULL,
            address VARCHAR(120) NOT NULL,
            phone VARCHAR(120),
            image_link VARCHAR(500),
            facebook_link VARCHAR(120),
            genres TEXT[] NOT NULL CHECK (cardinality(genres) > 0),
            website_link VARCHAR(120),
            seeking_talent BOOLEAN NOT NULL DEFAULT FALSE,
            seeking_description VARCHAR(500)
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL,
            city VARCHAR(120) NOT NULL,
            state VARCHAR(120) NOT NULL,
            phone VARCHAR(120),
            genres TEXT[] NOT NULL CHECK (cardinality(genres) > 0),
            image_link VARCHAR(500),
            facebook_link VARCHAR(120),
            website_link VARCHAR(120),
            seeking_venue BOOLEAN NOT NULL DEFAULT FALSE,
            seeking_description VARCHAR(500)
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    // A show has no lifecycle of its own: it goes when its venue or artist goes
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shows (
            id BIGSERIAL PRIMARY KEY,
            venue_id BIGINT NOT NULL REFERENCES venues(id) ON DELETE CASCADE,
            artist_id BIGINT NOT NULL REFERENCES artists(id) ON DELETE CASCADE,
            start_time TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(&mut *tx)
    .await?;

    create_indexes(&mut *tx).await?;
    tx.commit().await?;

    tracing::info!("Schema migrations complete");
    Ok(())
}

async fn create_indexes(conn: &mut PgConnection) -> Result<(), DbError> {
    // Area listing sort key
    sqlx::query(
        "CREATE INDEX IF NOT EXISTS idx_venues_area ON venues(city, name, state)",
    )
    .execute(&mut *conn)
    .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_artists_name ON artists(name)")
        .execute(&mut *conn)
        .await?;

    // Show joins in both directions
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id)")
        .execute(&mut *conn)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id)")
        .execute(&mut *conn)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_start ON shows(start_time)")
        .execute(&mut *conn)
        .await?;

    Ok(())
}
