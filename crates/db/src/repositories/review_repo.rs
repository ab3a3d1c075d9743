//! Repository for the `reviews` table.

use creatorhub_core::review::NewReview;
use sqlx::PgPool;

use crate::models::review::Review;

const COLUMNS: &str = "id, name, message, created_at";

pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review, returning the created row.
    pub async fn create(pool: &PgPool, input: &NewReview) -> Result<Review, sqlx::Error> {
        let query = format!(
            "INSERT INTO reviews (name, message) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(&input.name)
            .bind(&input.message)
            .fetch_one(pool)
            .await
    }

    /// All reviews, newest first. Ties on `created_at` fall back to id.
    pub async fn list_newest_first(pool: &PgPool) -> Result<Vec<Review>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM reviews ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Review>(&query).fetch_all(pool).await
    }
}
