//! Repository for the `publishers` table.

use pantry_core::types::DbId;
use sqlx::PgPool;

use crate::models::publisher::{Publisher, PublisherForm};

const COLUMNS: &str = "id, name, city, country, created_at, updated_at";

/// Provides CRUD operations for publishers.
pub struct PublisherRepo;

impl PublisherRepo {
    pub async fn create(pool: &PgPool, input: &PublisherForm) -> Result<Publisher, sqlx::Error> {
        let query = format!(
            "INSERT INTO publishers (name, city, country)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Publisher>(&query)
            .bind(&input.name)
            .bind(&input.city)
            .bind(&input.country)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Publisher>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM publishers WHERE id = $1");
        sqlx::query_as::<_, Publisher>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        pattern: Option<&str>,
    ) -> Result<Vec<Publisher>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM publishers
             WHERE ($1::text IS NULL OR name ILIKE $1)
             ORDER BY name"
        );
        sqlx::query_as::<_, Publisher>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Whether another publisher already uses `name`.
    pub async fn name_taken(
        pool: &PgPool,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM publishers
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
        input: &PublisherForm,
    ) -> Result<Option<Publisher>, sqlx::Error> {
        let query = format!(
            "UPDATE publishers SET name = $2, city = $3, country = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Publisher>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.city)
            .bind(&input.country)
            .fetch_optional(pool)
            .await
    }

    /// Delete a publisher. Its books stay, with `publisher_id` cleared.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM publishers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
