//! Artist repository

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{is_unique_violation, DbError};
use crate::models::{Artist, ArtistSummary, NewArtist, VenueShow};

/// Artist repository
pub struct ArtistRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ArtistRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert an artist. A duplicate name surfaces as [`DbError::Conflict`].
    pub async fn insert(&self, artist: &NewArtist) -> Result<Artist, DbError> {
        sqlx::query_as(
            r#"
            INSERT INTO artists (
                name, city, state, phone, image_link,
                facebook_link, website_link, genres,
                looking_for_venue, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(&artist.website_link)
        .bind(&artist.genres)
        .bind(artist.looking_for_venue)
        .bind(&artist.seeking_description)
        .fetch_one(self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                DbError::Conflict {
                    detail: format!("artist '{}' is already listed", artist.name),
                }
            } else {
                err.into()
            }
        })
    }

    /// All artists ordered by id.
    pub async fn list(&self) -> Result<Vec<Artist>, DbError> {
        let rows = sqlx::query_as("SELECT * FROM artists ORDER BY id")
            .fetch_all(self.pool)
            .await?;
        Ok(rows)
    }

    /// Case-insensitive substring search on name. An empty term matches
    /// every artist.
    pub async fn search(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<ArtistSummary>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                a.id, a.name,
                COUNT(s.id) FILTER (WHERE s.start_time > $2) AS num_upcoming_shows
            FROM artists a
            LEFT JOIN shows s ON s.artist_id = a.id
            WHERE a.name ILIKE '%' || $1 || '%'
            GROUP BY a.id
            ORDER BY a.name
            "#,
        )
        .bind(term)
        .bind(now)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Fetch an artist by id.
    pub async fn get(&self, id: i64) -> Result<Artist, DbError> {
        sqlx::query_as("SELECT * FROM artists WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "artist",
                id: id.to_string(),
            })
    }

    /// Full replace of every editable field.
    pub async fn update(&self, id: i64, artist: &NewArtist) -> Result<Artist, DbError> {
        sqlx::query_as(
            r#"
            UPDATE artists SET
                name = $2, city = $3, state = $4, phone = $5,
                image_link = $6, facebook_link = $7, website_link = $8,
                genres = $9, looking_for_venue = $10, seeking_description = $11
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&artist.name)
        .bind(&artist.city)
        .bind(&artist.state)
        .bind(&artist.phone)
        .bind(&artist.image_link)
        .bind(&artist.facebook_link)
        .bind(&artist.website_link)
        .bind(&artist.genres)
        .bind(artist.looking_for_venue)
        .bind(&artist.seeking_description)
        .fetch_optional(self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                DbError::Conflict {
                    detail: format!("artist '{}' is already listed", artist.name),
                }
            } else {
                DbError::from(err)
            }
        })?
        .ok_or_else(|| DbError::NotFound {
            resource: "artist",
            id: id.to_string(),
        })
    }

    /// Shows this artist already played, newest first.
    pub async fn past_shows(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueShow>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT s.venue_id, v.name AS venue_name,
                   v.image_link AS venue_image_link, s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = $1 AND s.start_time <= $2
            ORDER BY s.start_time DESC
            "#,
        )
        .bind(id)
        .bind(now)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Shows this artist plays strictly after `now`, soonest first.
    pub async fn upcoming_shows(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueShow>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT s.venue_id, v.name AS venue_name,
                   v.image_link AS venue_image_link, s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            WHERE s.artist_id = $1 AND s.start_time > $2
            ORDER BY s.start_time
            "#,
        )
        .bind(id)
        .bind(now)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }
}
