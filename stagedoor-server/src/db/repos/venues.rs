//! Venue repository
//!
//! Index and search rows carry `num_upcoming_shows` computed in the same
//! query with a filtered count over the shows join.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use super::{is_fk_violation, is_unique_violation, DbError};
use crate::models::{ArtistShow, NewVenue, Venue, VenueListingRow, VenueSummary};

/// Venue repository
pub struct VenueRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> VenueRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Insert a venue. A duplicate name surfaces as [`DbError::Conflict`],
    /// leaving the table untouched.
    pub async fn insert(&self, venue: &NewVenue) -> Result<Venue, DbError> {
        sqlx::query_as(
            r#"
            INSERT INTO venues (
                name, city, state, address, phone, image_link,
                facebook_link, website_link, genres,
                looking_for_talent, seeking_description
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING *
            "#,
        )
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(&venue.website_link)
        .bind(&venue.genres)
        .bind(venue.looking_for_talent)
        .bind(&venue.seeking_description)
        .fetch_one(self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                DbError::Conflict {
                    detail: format!("venue '{}' is already listed", venue.name),
                }
            } else {
                err.into()
            }
        })
    }

    /// All venues with their locale and upcoming-show count, one query.
    pub async fn list(&self, now: DateTime<Utc>) -> Result<Vec<VenueListingRow>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                v.id, v.name, v.city, v.state,
                COUNT(s.id) FILTER (WHERE s.start_time > $1) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            GROUP BY v.id
            ORDER BY v.city, v.state, v.name
            "#,
        )
        .bind(now)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Case-insensitive substring search on name. An empty term matches
    /// every venue.
    pub async fn search(
        &self,
        term: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<VenueSummary>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                v.id, v.name,
                COUNT(s.id) FILTER (WHERE s.start_time > $2) AS num_upcoming_shows
            FROM venues v
            LEFT JOIN shows s ON s.venue_id = v.id
            WHERE v.name ILIKE '%' || $1 || '%'
            GROUP BY v.id
            ORDER BY v.name
            "#,
        )
        .bind(term)
        .bind(now)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Fetch a venue by id.
    pub async fn get(&self, id: i64) -> Result<Venue, DbError> {
        sqlx::query_as("SELECT * FROM venues WHERE id = $1")
            .bind(id)
            .fetch_optional(self.pool)
            .await?
            .ok_or_else(|| DbError::NotFound {
                resource: "venue",
                id: id.to_string(),
            })
    }

    /// Full replace of every editable field.
    pub async fn update(&self, id: i64, venue: &NewVenue) -> Result<Venue, DbError> {
        sqlx::query_as(
            r#"
            UPDATE venues SET
                name = $2, city = $3, state = $4, address = $5, phone = $6,
                image_link = $7, facebook_link = $8, website_link = $9,
                genres = $10, looking_for_talent = $11, seeking_description = $12
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&venue.name)
        .bind(&venue.city)
        .bind(&venue.state)
        .bind(&venue.address)
        .bind(&venue.phone)
        .bind(&venue.image_link)
        .bind(&venue.facebook_link)
        .bind(&venue.website_link)
        .bind(&venue.genres)
        .bind(venue.looking_for_talent)
        .bind(&venue.seeking_description)
        .fetch_optional(self.pool)
        .await
        .map_err(|err| {
            if is_unique_violation(&err) {
                DbError::Conflict {
                    detail: format!("venue '{}' is already listed", venue.name),
                }
            } else {
                DbError::from(err)
            }
        })?
        .ok_or_else(|| DbError::NotFound {
            resource: "venue",
            id: id.to_string(),
        })
    }

    /// Delete a venue by id. A venue that still has shows is rejected by
    /// the ON DELETE RESTRICT constraint and surfaces as a conflict.
    pub async fn delete(&self, id: i64) -> Result<(), DbError> {
        let deleted: Option<(i64,)> = sqlx::query_as("DELETE FROM venues WHERE id = $1 RETURNING id")
            .bind(id)
            .fetch_optional(self.pool)
            .await
            .map_err(|err| {
                if is_fk_violation(&err) {
                    DbError::Conflict {
                        detail: format!("venue {} still has scheduled shows", id),
                    }
                } else {
                    DbError::from(err)
                }
            })?;

        match deleted {
            Some(_) => Ok(()),
            None => Err(DbError::NotFound {
                resource: "venue",
                id: id.to_string(),
            }),
        }
    }

    /// Shows at this venue that already started, newest first.
    pub async fn past_shows(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<ArtistShow>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT s.artist_id, a.name AS artist_name,
                   a.image_link AS artist_image_link, s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = $1 AND s.start_time <= $2
            ORDER BY s.start_time DESC
            "#,
        )
        .bind(id)
        .bind(now)
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Shows at this venue strictly after `now`, soonest first.
    pub async fn upcoming_shows(
        &self,
        id: i64,
        now: DateTime<Utc>,
    ) -> Result<Vec<ArtistShow>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT s.artist_id, a.name AS artist_name,
                   a.image_link AS artist_image_link, s.start_time
            FROM shows s
            JOIN artists a ON a.id = s.artist_id
            WHERE s.venue_id = $1 AND s.start_time > $2
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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VenueFormInput;

    fn sample(name: &str) -> NewVenue {
        NewVenue::validate(VenueFormInput {
            name: Some(name.into()),
            city: Some("San Francisco".into()),
            state: Some("CA".into()),
            address: Some("1015 Folsom Street".into()),
            phone: Some("123-123-1234".into()),
            image_link: Some("https://example.com/venue.jpg".into()),
            genres: vec!["Jazz".into()],
            ..Default::default()
        })
        .expect("sample venue is valid")
    }

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        crate::db::migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn duplicate_name_conflicts_and_leaves_count_unchanged() {
        let pool = test_pool().await;
        let repo = VenueRepo::new(&pool);
        let name = format!("dup-venue-{}", std::process::id());

        repo.insert(&sample(&name)).await.expect("first insert");
        let before: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM venues")
            .fetch_one(&pool)
            .await
            .expect("count");

        let err = repo.insert(&sample(&name)).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));

        let after: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM venues")
            .fetch_one(&pool)
            .await
            .expect("count");
        assert_eq!(before.0, after.0);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn search_is_case_insensitive_substring() {
        let pool = test_pool().await;
        let repo = VenueRepo::new(&pool);
        let name = format!("The Musical Hop {}", std::process::id());
        repo.insert(&sample(&name)).await.expect("insert");

        let hits = repo.search("hop", Utc::now()).await.expect("search");
        assert!(hits.iter().any(|v| v.name == name));

        // Empty term matches everything
        let all = repo.search("", Utc::now()).await.expect("search");
        assert!(all.iter().any(|v| v.name == name));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn update_replaces_every_field_and_keeps_id() {
        let pool = test_pool().await;
        let repo = VenueRepo::new(&pool);
        let name = format!("edit-me-{}", std::process::id());
        let created = repo.insert(&sample(&name)).await.expect("insert");

        let mut replacement = sample(&format!("{}-renamed", name));
        replacement.city = "Oakland".into();
        replacement.looking_for_talent = true;
        let updated = repo.update(created.id, &replacement).await.expect("update");

        assert_eq!(updated.id, created.id);
        assert_eq!(updated.city, "Oakland");
        assert!(updated.looking_for_talent);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn future_show_is_upcoming_not_past() {
        use crate::db::repos::{ArtistRepo, ShowRepo};
        use crate::models::{ArtistFormInput, NewArtist, NewShow};
        use chrono::Duration;

        let pool = test_pool().await;
        let tag = format!("{}-{}", std::process::id(), Utc::now().timestamp_micros());

        let venue = VenueRepo::new(&pool)
            .insert(&sample(&format!("classify-venue-{}", tag)))
            .await
            .expect("venue insert");
        let artist = ArtistRepo::new(&pool)
            .insert(
                &NewArtist::validate(ArtistFormInput {
                    name: Some(format!("classify-artist-{}", tag)),
                    city: Some("San Francisco".into()),
                    state: Some("CA".into()),
                    phone: Some("326-123-5000".into()),
                    image_link: Some("https://example.com/artist.jpg".into()),
                    genres: vec!["Jazz".into()],
                    ..Default::default()
                })
                .expect("artist input valid"),
            )
            .await
            .expect("artist insert");

        let now = Utc::now();
        ShowRepo::new(&pool)
            .insert(&NewShow {
                venue_id: venue.id,
                artist_id: artist.id,
                start_time: now + Duration::days(30),
            })
            .await
            .expect("show insert");

        let repo = VenueRepo::new(&pool);
        let upcoming = repo.upcoming_shows(venue.id, now).await.expect("upcoming");
        let past = repo.past_shows(venue.id, now).await.expect("past");
        assert_eq!(upcoming.len(), 1);
        assert_eq!(upcoming[0].artist_id, artist.id);
        assert!(past.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_missing_venue_is_not_found() {
        let pool = test_pool().await;
        let err = VenueRepo::new(&pool).delete(i64::MAX).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_removes_only_the_targeted_venue() {
        let pool = test_pool().await;
        let repo = VenueRepo::new(&pool);
        let tag = format!("{}-{}", std::process::id(), Utc::now().timestamp_micros());

        let doomed = repo
            .insert(&sample(&format!("doomed-venue-{}", tag)))
            .await
            .expect("insert doomed");
        let survivor = repo
            .insert(&sample(&format!("survivor-venue-{}", tag)))
            .await
            .expect("insert survivor");

        repo.delete(doomed.id).await.expect("delete");

        let err = repo.get(doomed.id).await.unwrap_err();
        assert!(matches!(err, DbError::NotFound { .. }));
        let kept = repo.get(survivor.id).await.expect("survivor still listed");
        assert_eq!(kept.id, survivor.id);
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn delete_venue_with_show_is_conflict_and_keeps_row() {
        use crate::db::repos::{ArtistRepo, ShowRepo};
        use crate::models::{ArtistFormInput, NewArtist, NewShow};
        use chrono::Duration;

        let pool = test_pool().await;
        let tag = format!("{}-{}", std::process::id(), Utc::now().timestamp_micros());

        let repo = VenueRepo::new(&pool);
        let venue = repo
            .insert(&sample(&format!("booked-venue-{}", tag)))
            .await
            .expect("venue insert");
        let artist = ArtistRepo::new(&pool)
            .insert(
                &NewArtist::validate(ArtistFormInput {
                    name: Some(format!("booked-artist-{}", tag)),
                    city: Some("San Francisco".into()),
                    state: Some("CA".into()),
                    phone: Some("326-123-5000".into()),
                    image_link: Some("https://example.com/artist.jpg".into()),
                    genres: vec!["Jazz".into()],
                    ..Default::default()
                })
                .expect("artist input valid"),
            )
            .await
            .expect("artist insert");
        ShowRepo::new(&pool)
            .insert(&NewShow {
                venue_id: venue.id,
                artist_id: artist.id,
                start_time: Utc::now() + Duration::days(7),
            })
            .await
            .expect("show insert");

        let err = repo.delete(venue.id).await.unwrap_err();
        assert!(matches!(err, DbError::Conflict { .. }));

        // The restricted delete must leave the row in place
        let kept = repo.get(venue.id).await.expect("venue still listed");
        assert_eq!(kept.id, venue.id);
    }
}
