//! Aggregate queries behind the recipe statistics view.

use sqlx::PgPool;

use crate::models::stats::{ChefRecipeCount, RecipeStats, TopRecipe};

pub struct StatsRepo;

impl StatsRepo {
    /// Every chef with their recipe count, busiest first, ties by name.
    pub async fn chef_recipe_counts(pool: &PgPool) -> Result<Vec<ChefRecipeCount>, sqlx::Error> {
        sqlx::query_as::<_, ChefRecipeCount>(
            "SELECT c.id AS chef_id, c.name AS chef_name, COUNT(r.id) AS recipe_count
             FROM chefs c
             LEFT JOIN recipes r ON r.chef_id = c.id
             GROUP BY c.id, c.name
             ORDER BY recipe_count DESC, c.name, c.id",
        )
        .fetch_all(pool)
        .await
    }

    /// Mean cook time over all recipes, `None` when there are none.
    pub async fn average_cook_time(pool: &PgPool) -> Result<Option<f64>, sqlx::Error> {
        sqlx::query_scalar::<_, Option<f64>>(
            "SELECT AVG(cook_time_in_minutes)::float8 FROM recipes",
        )
        .fetch_one(pool)
        .await
    }

    /// The `limit` public recipes using the most ingredients; ties go to the
    /// newer recipe, then by title. Private recipes still count toward the
    /// totals but are never named here.
    pub async fn top_by_ingredient_count(
        pool: &PgPool,
        limit: i64,
    ) -> Result<Vec<TopRecipe>, sqlx::Error> {
        sqlx::query_as::<_, TopRecipe>(
            "SELECT r.id, r.title, COUNT(ri.ingredient_id) AS ingredient_count, r.created_at
             FROM recipes r
             LEFT JOIN recipe_ingredients ri ON ri.recipe_id = r.id
             WHERE r.is_public
             GROUP BY r.id
             ORDER BY ingredient_count DESC, r.created_at DESC, r.title
             LIMIT $1",
        )
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    pub async fn total_recipes(pool: &PgPool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM recipes")
            .fetch_one(pool)
            .await
    }

    /// All statistics in one response.
    pub async fn collect(pool: &PgPool, top_limit: i64) -> Result<RecipeStats, sqlx::Error> {
        Ok(RecipeStats {
            total_recipes: Self::total_recipes(pool).await?,
            chefs: Self::chef_recipe_counts(pool).await?,
            average_cook_time: Self::average_cook_time(pool).await?,
            top_recipes_by_ingredients: Self::top_by_ingredient_count(pool, top_limit).await?,
        })
    }
}
