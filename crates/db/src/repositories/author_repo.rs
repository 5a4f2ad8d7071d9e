//! Repository for the `authors` table.

use pantry_core::types::DbId;
use sqlx::PgPool;

use crate::models::author::{Author, AuthorForm};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, first_name, last_name, birth_year, created_at, updated_at";

/// Provides CRUD operations for authors.
pub struct AuthorRepo;

impl AuthorRepo {
    pub async fn create(pool: &PgPool, input: &AuthorForm) -> Result<Author, sqlx::Error> {
        let query = format!(
            "INSERT INTO authors (first_name, last_name, birth_year)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Author>(&query)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.birth_year)
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Author>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM authors WHERE id = $1");
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List authors ordered by last then first name, optionally narrowed by
    /// an `ILIKE` pattern over either name.
    pub async fn list(pool: &PgPool, pattern: Option<&str>) -> Result<Vec<Author>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM authors
             WHERE ($1::text IS NULL OR first_name ILIKE $1 OR last_name ILIKE $1)
             ORDER BY last_name, first_name, id"
        );
        sqlx::query_as::<_, Author>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    /// Replace every editable field. Returns `None` if the author does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &AuthorForm,
    ) -> Result<Option<Author>, sqlx::Error> {
        let query = format!(
            "UPDATE authors SET first_name = $2, last_name = $3, birth_year = $4
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Author>(&query)
            .bind(id)
            .bind(&input.first_name)
            .bind(&input.last_name)
            .bind(input.birth_year)
            .fetch_optional(pool)
            .await
    }

    /// Delete an author and, by cascade, their books.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
