//! Repository for the `movie_genres` table.

use pantry_core::types::DbId;
use sqlx::PgPool;

use crate::models::reference::NameRef;

pub struct MovieGenreRepo;

impl MovieGenreRepo {
    pub async fn list(pool: &PgPool) -> Result<Vec<NameRef>, sqlx::Error> {
        sqlx::query_as::<_, NameRef>("SELECT id, name FROM movie_genres ORDER BY id")
            .fetch_all(pool)
            .await
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<NameRef>, sqlx::Error> {
        sqlx::query_as::<_, NameRef>("SELECT id, name FROM movie_genres WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn create(pool: &PgPool, name: &str) -> Result<NameRef, sqlx::Error> {
        sqlx::query_as::<_, NameRef>("INSERT INTO movie_genres (name) VALUES ($1) RETURNING id, name")
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn name_taken(
        pool: &PgPool,
        name: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM movie_genres
                WHERE name = $1 AND ($2::bigint IS NULL OR id <> $2)
             )",
        )
        .bind(name)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    /// Rename a genre. Returns `None` if it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        name: &str,
    ) -> Result<Option<NameRef>, sqlx::Error> {
        sqlx::query_as::<_, NameRef>(
            "UPDATE movie_genres SET name = $2 WHERE id = $1 RETURNING id, name",
        )
        .bind(id)
        .bind(name)
        .fetch_optional(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movie_genres WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Resolve a genre by name within an existing transaction, creating it
    /// on first use.
    pub(crate) async fn create_or_get_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        name: &str,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO movie_genres (name) VALUES ($1)
             ON CONFLICT (name) DO UPDATE SET name = EXCLUDED.name
             RETURNING id",
        )
        .bind(name)
        .fetch_one(&mut **tx)
        .await
    }
}
