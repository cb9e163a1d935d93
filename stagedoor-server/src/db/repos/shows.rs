//! Show repository
//!
//! Shows are insert-only through the site. Referential integrity is the
//! database's job: inserting against a missing venue or artist trips the
//! foreign key and comes back as [`DbError::ForeignKey`].

use sqlx::PgPool;

use super::{is_fk_violation, DbError};
use crate::models::{NewShow, ShowListing};

/// Show repository
pub struct ShowRepo<'a> {
    pool: &'a PgPool,
}

impl<'a> ShowRepo<'a> {
    pub fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All shows joined to both parents, newest start time first.
    pub async fn list(&self) -> Result<Vec<ShowListing>, DbError> {
        let rows = sqlx::query_as(
            r#"
            SELECT
                s.venue_id, v.name AS venue_name,
                s.artist_id, a.name AS artist_name,
                a.image_link AS artist_image_link,
                s.start_time
            FROM shows s
            JOIN venues v ON v.id = s.venue_id
            JOIN artists a ON a.id = s.artist_id
            ORDER BY s.start_time DESC
            "#,
        )
        .fetch_all(self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a show.
    pub async fn insert(&self, show: &NewShow) -> Result<i64, DbError> {
        let (id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO shows (venue_id, artist_id, start_time)
            VALUES ($1, $2, $3)
            RETURNING id
            "#,
        )
        .bind(show.venue_id)
        .bind(show.artist_id)
        .bind(show.start_time)
        .fetch_one(self.pool)
        .await
        .map_err(|err| {
            if is_fk_violation(&err) {
                DbError::ForeignKey {
                    detail: format!(
                        "venue {} or artist {} does not exist",
                        show.venue_id, show.artist_id
                    ),
                }
            } else {
                DbError::from(err)
            }
        })?;
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn test_pool() -> PgPool {
        let url = std::env::var("DATABASE_URL").expect("DATABASE_URL required");
        let pool = crate::db::create_pool(&url).await.expect("pool creation failed");
        crate::db::migrations::run(&pool).await.expect("migrations failed");
        pool
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn insert_with_missing_parents_is_rejected() {
        let pool = test_pool().await;
        let err = ShowRepo::new(&pool)
            .insert(&NewShow {
                venue_id: i64::MAX,
                artist_id: i64::MAX,
                start_time: Utc::now(),
            })
            .await
            .unwrap_err();
        assert!(matches!(err, DbError::ForeignKey { .. }));
    }

    #[tokio::test]
    #[ignore = "requires database"]
    async fn listing_orders_by_start_time_descending() {
        let pool = test_pool().await;
        let shows = ShowRepo::new(&pool).list().await.expect("list");
        for pair in shows.windows(2) {
            assert!(pair[0].start_time >= pair[1].start_time);
        }
    }
}
