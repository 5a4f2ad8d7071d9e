//! Repository for the book `genres` table.

use pantry_core::types::DbId;
use sqlx::PgPool;

use crate::models::genre::{Genre, GenreForm};

use super::links;

const COLUMNS: &str = "id, name, created_at, updated_at";

/// Provides CRUD operations for book genres.
pub struct GenreRepo;

impl GenreRepo {
    pub async fn create(pool: &PgPool, input: &GenreForm) -> Result<Genre, sqlx::Error> {
        let query = format!("INSERT INTO genres (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Genre>(&query)
            .bind(&input.name)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM genres WHERE id = $1");
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool, pattern: Option<&str>) -> Result<Vec<Genre>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM genres
             WHERE ($1::text IS NULL OR name ILIKE $1)
             ORDER BY name"
        );
        sqlx::query_as::<_, Genre>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// The subset of `ids` that refer to existing genres.
    pub async fn existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        links::existing_ids(pool, "genres", ids).await
    }

    pub async fn name_taken(
        pool: &PgPool,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM genres
                WHERE name = $1 AND ($2::bigint IS NULL OR id <> $2)
             )",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &GenreForm,
    ) -> Result<Option<Genre>, sqlx::Error> {
        let query = format!("UPDATE genres SET name = $2 WHERE id = $1 RETURNING {COLUMNS}");
        sqlx::query_as::<_, Genre>(&query)
            .bind(id)
            .bind(&input.name)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM genres WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
