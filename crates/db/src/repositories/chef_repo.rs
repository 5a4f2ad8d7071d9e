//! Repository for the `chefs` table.

use pantry_core::types::DbId;
use sqlx::PgPool;

use crate::models::chef::{Chef, ChefSummary};
use crate::models::ingredient::Ingredient;

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, name, bio, created_at, updated_at";

/// Provides read access to chef profiles and the on-demand profile used
/// when an account first writes a recipe.
pub struct ChefRepo;

impl ChefRepo {
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Chef>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chefs WHERE id = $1");
        sqlx::query_as::<_, Chef>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// The chef profile linked to an account, if any.
    pub async fn find_by_user(pool: &PgPool, user_id: DbId) -> Result<Option<Chef>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM chefs WHERE user_id = $1");
        sqlx::query_as::<_, Chef>(&query)
            .bind(user_id)
            .fetch_optional(pool)
            .await
    }

    /// Return the account's chef profile, creating one named `name` if the
    /// account has none yet.
    pub async fn find_or_create_for_user(
        pool: &PgPool,
        user_id: DbId,
        name: &str,
    ) -> Result<Chef, sqlx::Error> {
        let query = format!(
            "INSERT INTO chefs (user_id, name) VALUES ($1, $2)
             ON CONFLICT (user_id) DO UPDATE SET name = chefs.name
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Chef>(&query)
            .bind(user_id)
            .bind(name)
            .fetch_one(pool)
            .await
    }

    /// List chefs by name with how many recipes each has written.
    pub async fn list(
        pool: &PgPool,
        pattern: Option<&str>,
    ) -> Result<Vec<ChefSummary>, sqlx::Error> {
        sqlx::query_as::<_, ChefSummary>(
            "SELECT c.id, c.user_id, c.name, c.bio, c.created_at, c.updated_at,
                    COUNT(r.id) AS recipe_count
             FROM chefs c
             LEFT JOIN recipes r ON r.chef_id = c.id
             WHERE ($1::text IS NULL OR c.name ILIKE $1)
             GROUP BY c.id
             ORDER BY c.name, c.id",
        )
        .bind(pattern)
        .fetch_all(pool)
        .await
    }

    /// Distinct ingredients used across all of a chef's recipes, by name.
    pub async fn ingredients_used(
        pool: &PgPool,
        chef_id: DbId,
    ) -> Result<Vec<Ingredient>, sqlx::Error> {
        sqlx::query_as::<_, Ingredient>(
            "SELECT i.id, i.name, i.created_at, i.updated_at
             FROM ingredients i
             WHERE EXISTS (
                SELECT 1 FROM recipe_ingredients ri
                JOIN recipes r ON r.id = ri.recipe_id
                WHERE ri.ingredient_id = i.id AND r.chef_id = $1
             )
             ORDER BY i.name",
        )
        .bind(chef_id)
        .fetch_all(pool)
        .await
    }
}
