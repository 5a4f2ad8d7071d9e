//! Repository for the `ingredients` table.

use pantry_core::types::DbId;
use sqlx::PgPool;

use crate::models::ingredient::Ingredient;

use super::links;

const COLUMNS: &str = "id, name, created_at, updated_at";

pub struct IngredientRepo;

impl IngredientRepo {
    pub async fn create(pool: &PgPool, name: &str) -> Result<Ingredient, sqlx::Error> {
        let query = format!("INSERT INTO ingredients (name) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn list(
        pool: &PgPool,
        pattern: Option<&str>,
    ) -> Result<Vec<Ingredient>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM ingredients
             WHERE ($1::text IS NULL OR name ILIKE $1)
             ORDER BY name"
        );
        sqlx::query_as::<_, Ingredient>(&query)
            .bind(pattern)
            .fetch_all(pool)
            .await
    }

    pub async fn name_taken(pool: &PgPool, name: &str) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM ingredients WHERE name = $1)")
            .bind(name)
            .fetch_one(pool)
            .await
    }

    pub async fn existing_ids(pool: &PgPool, ids: &[DbId]) -> Result<Vec<DbId>, sqlx::Error> {
        links::existing_ids(pool, "ingredients", ids).await
    }
}
