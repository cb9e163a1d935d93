//! Idempotent schema setup for the directory tables
//!
//! Shows reference venues and artists with ON DELETE RESTRICT: deleting a
//! venue that still has shows is rejected at the constraint and surfaced
//! as a conflict, never a cascade.

use sqlx::PgPool;

use crate::models::artist::DEFAULT_ARTIST_SEEKING_DESCRIPTION;
use crate::models::venue::DEFAULT_VENUE_SEEKING_DESCRIPTION;

/// Run all migrations
pub async fn run(pool: &PgPool) -> Result<(), sqlx::Error> {
    tracing::info!("Running migrations...");

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS venues (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            city VARCHAR(120) NOT NULL,
            state VARCHAR(120) NOT NULL,
            address VARCHAR(120) NOT NULL,
            phone VARCHAR(120) NOT NULL,
            image_link VARCHAR(500) NOT NULL,
            facebook_link VARCHAR(120),
            website_link VARCHAR(120),
            genres TEXT[] NOT NULL DEFAULT '{{}}',
            looking_for_talent BOOLEAN NOT NULL DEFAULT FALSE,
            seeking_description VARCHAR(500) NOT NULL DEFAULT '{DEFAULT_VENUE_SEEKING_DESCRIPTION}'
        )
        "#,
    ))
    .execute(pool)
    .await?;

    sqlx::query(&format!(
        r#"
        CREATE TABLE IF NOT EXISTS artists (
            id BIGSERIAL PRIMARY KEY,
            name TEXT NOT NULL UNIQUE,
            city VARCHAR(120) NOT NULL,
            state VARCHAR(120) NOT NULL,
            phone VARCHAR(120) NOT NULL,
            image_link VARCHAR(500) NOT NULL,
            facebook_link VARCHAR(120),
            website_link VARCHAR(120),
            genres TEXT[] NOT NULL DEFAULT '{{}}',
            looking_for_venue BOOLEAN NOT NULL DEFAULT FALSE,
            seeking_description VARCHAR(500) NOT NULL DEFAULT '{DEFAULT_ARTIST_SEEKING_DESCRIPTION}'
        )
        "#,
    ))
    .execute(pool)
    .await?;

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS shows (
            id BIGSERIAL PRIMARY KEY,
            venue_id BIGINT NOT NULL REFERENCES venues(id) ON DELETE RESTRICT,
            artist_id BIGINT NOT NULL REFERENCES artists(id) ON DELETE RESTRICT,
            start_time TIMESTAMPTZ NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    create_indexes(pool).await?;

    tracing::info!("Migrations complete");
    Ok(())
}

async fn create_indexes(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_venue ON shows(venue_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_artist ON shows(artist_id)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_shows_start_time ON shows(start_time DESC)")
        .execute(pool)
        .await?;
    sqlx::query("CREATE INDEX IF NOT EXISTS idx_venues_city_state ON venues(city, state)")
        .execute(pool)
        .await?;

    Ok(())
}
