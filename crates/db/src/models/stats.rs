//! Aggregate recipe statistics.

use pantry_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// Number of recipes written by one chef.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChefRecipeCount {
    pub chef_id: DbId,
    pub chef_name: String,
    pub recipe_count: i64,
}

/// A recipe ranked by how many ingredients it uses.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct TopRecipe {
    pub id: DbId,
    pub title: String,
    pub ingredient_count: i64,
    pub created_at: Timestamp,
}

/// Body of `GET /stats`.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeStats {
    pub total_recipes: i64,
    pub chefs: Vec<ChefRecipeCount>,
    /// Mean cook time in minutes; `None` when there are no recipes.
    pub average_cook_time: Option<f64>,
    pub top_recipes_by_ingredients: Vec<TopRecipe>,
}
