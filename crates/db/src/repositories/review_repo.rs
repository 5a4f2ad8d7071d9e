//! Repository for the `reviews` table.

use std::collections::HashMap;

use pantry_core::types::DbId;
use sqlx::PgPool;

use crate::models::review::{Review, ReviewForm, ReviewResponse};

/// Review columns joined with the reviewer's username.
const SELECT: &str = "\
    SELECT rv.id, rv.movie_id, rv.reviewer_id, u.username AS reviewer_username, \
           rv.rating, rv.comment, rv.created_at, rv.updated_at \
    FROM reviews rv \
    JOIN users u ON u.id = rv.reviewer_id";

pub struct ReviewRepo;

impl ReviewRepo {
    /// Insert a review by `reviewer_id`.
    pub async fn create(
        pool: &PgPool,
        reviewer_id: DbId,
        input: &ReviewForm,
    ) -> Result<Review, sqlx::Error> {
        sqlx::query_as::<_, Review>(
            "WITH inserted AS (
                INSERT INTO reviews (movie_id, reviewer_id, rating, comment)
                VALUES ($1, $2, $3, $4)
                RETURNING *
             )
             SELECT rv.id, rv.movie_id, rv.reviewer_id, u.username AS reviewer_username,
                    rv.rating, rv.comment, rv.created_at, rv.updated_at
             FROM inserted rv
             JOIN users u ON u.id = rv.reviewer_id",
        )
        .bind(input.movie)
        .bind(reviewer_id)
        .bind(input.rating)
        .bind(&input.comment)
        .fetch_one(pool)
        .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Review>, sqlx::Error> {
        let query = format!("{SELECT} WHERE rv.id = $1");
        sqlx::query_as::<_, Review>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// All reviews, optionally only those of one movie, in creation order.
    pub async fn list(pool: &PgPool, movie_id: Option<DbId>) -> Result<Vec<Review>, sqlx::Error> {
        let query = format!(
            "{SELECT} WHERE ($1::bigint IS NULL OR rv.movie_id = $1) ORDER BY rv.id"
        );
        sqlx::query_as::<_, Review>(&query)
            .bind(movie_id)
            .fetch_all(pool)
            .await
    }

    /// Replace a review's movie, rating and comment. The reviewer never changes.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &ReviewForm,
    ) -> Result<Option<Review>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE reviews SET movie_id = $2, rating = $3, comment = $4 WHERE id = $1",
        )
        .bind(id)
        .bind(input.movie)
        .bind(input.rating)
        .bind(&input.comment)
        .execute(pool)
        .await?;
        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM reviews WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Reviews of many movies at once, grouped by movie.
    pub async fn for_movies(
        pool: &PgPool,
        movie_ids: &[DbId],
    ) -> Result<HashMap<DbId, Vec<ReviewResponse>>, sqlx::Error> {
        if movie_ids.is_empty() {
            return Ok(HashMap::new());
        }
        let query = format!("{SELECT} WHERE rv.movie_id = ANY($1) ORDER BY rv.id");
        let rows = sqlx::query_as::<_, Review>(&query)
            .bind(movie_ids)
            .fetch_all(pool)
            .await?;

        let mut grouped: HashMap<DbId, Vec<ReviewResponse>> = HashMap::new();
        for review in rows {
            grouped
                .entry(review.movie_id)
                .or_default()
                .push(review.into());
        }
        Ok(grouped)
    }
}
