//! Repository for the `recipes` table and its ingredient/tag links.
//!
//! Listing filters are bound as nullable parameters so one statement serves
//! every combination; junction filters use `EXISTS` so a recipe matching a
//! filter through several rows is still returned once.

use pantry_core::pagination::Page;
use pantry_core::recipes::{RecipeFilter, RECIPES_PER_PAGE};
use pantry_core::types::DbId;
use sqlx::PgPool;

use crate::models::recipe::{Recipe, RecipeDetail, RecipeForm, RecipeRow, RecipeSummary};

use super::links::{self, RECIPE_INGREDIENTS, RECIPE_TAGS};
use super::RecipeImageRepo;

/// Column list for `recipes` queries.
const COLUMNS: &str = "id, title, chef_id, instructions, cook_time_in_minutes, difficulty, \
                       is_public, image, created_at, updated_at";

/// Recipe columns joined with the chef's name and owning account.
const ROW_SELECT: &str = "\
    SELECT r.id, r.title, r.chef_id, r.instructions, r.cook_time_in_minutes, r.difficulty, \
           r.is_public, r.image, r.created_at, r.updated_at, \
           c.name AS chef_name, c.user_id AS owner_user_id \
    FROM recipes r \
    LEFT JOIN chefs c ON c.id = r.chef_id";

/// Listing filter. `$1` tag, `$2` ingredient, `$3` chef pattern, `$4` title
/// pattern, `$5` difficulty code, `$6` viewing user (private recipes are
/// only visible to their owner).
const FILTER_SQL: &str = "\
    WHERE ($1::text IS NULL OR EXISTS ( \
            SELECT 1 FROM recipe_tags rt JOIN tags t ON t.id = rt.tag_id \
            WHERE rt.recipe_id = r.id AND LOWER(t.name) = LOWER($1))) \
      AND ($2::text IS NULL OR EXISTS ( \
            SELECT 1 FROM recipe_ingredients ri JOIN ingredients i ON i.id = ri.ingredient_id \
            WHERE ri.recipe_id = r.id AND LOWER(i.name) = LOWER($2))) \
      AND ($3::text IS NULL OR c.name ILIKE $3) \
      AND ($4::text IS NULL OR r.title ILIKE $4) \
      AND ($5::text IS NULL OR r.difficulty = $5) \
      AND (r.is_public OR ($6::bigint IS NOT NULL AND c.user_id = $6))";

/// Listing order: newest first, then by title.
const ORDER_SQL: &str = "ORDER BY r.created_at DESC, r.title, r.id";

/// Provides CRUD and listing operations for recipes.
pub struct RecipeRepo;

impl RecipeRepo {
    // -----------------------------------------------------------------------
    // Writes
    // -----------------------------------------------------------------------

    /// Insert a recipe for `chef_id` with its ingredient and tag links.
    pub async fn create(
        pool: &PgPool,
        chef_id: DbId,
        input: &RecipeForm,
    ) -> Result<Recipe, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO recipes (title, chef_id, instructions, cook_time_in_minutes, difficulty, is_public)
             VALUES ($1, $2, $3, $4, $5, $6)
             RETURNING {COLUMNS}"
        );
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(&input.title)
            .bind(chef_id)
            .bind(&input.instructions)
            .bind(input.cook_time_in_minutes)
            .bind(input.difficulty.code())
            .bind(input.is_public)
            .fetch_one(&mut *tx)
            .await?;

        links::replace_links(&mut tx, &RECIPE_INGREDIENTS, recipe.id, &input.ingredients).await?;
        links::replace_links(&mut tx, &RECIPE_TAGS, recipe.id, &input.tags).await?;

        tx.commit().await?;
        Ok(recipe)
    }

    /// Replace a recipe's editable fields and links. The chef never changes.
    ///
    /// Returns `None` if the recipe does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &RecipeForm,
    ) -> Result<Option<Recipe>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE recipes SET
                title = $2, instructions = $3, cook_time_in_minutes = $4,
                difficulty = $5, is_public = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let recipe = sqlx::query_as::<_, Recipe>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.instructions)
            .bind(input.cook_time_in_minutes)
            .bind(input.difficulty.code())
            .bind(input.is_public)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(ref recipe) = recipe {
            links::replace_links(&mut tx, &RECIPE_INGREDIENTS, recipe.id, &input.ingredients)
                .await?;
            links::replace_links(&mut tx, &RECIPE_TAGS, recipe.id, &input.tags).await?;
        }

        tx.commit().await?;
        Ok(recipe)
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Reads
    // -----------------------------------------------------------------------

    /// A recipe joined with its chef and owner, for visibility and
    /// ownership checks.
    pub async fn find_row(pool: &PgPool, id: DbId) -> Result<Option<RecipeRow>, sqlx::Error> {
        let query = format!("{ROW_SELECT} WHERE r.id = $1");
        sqlx::query_as::<_, RecipeRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Expand a recipe row into its list shape.
    pub async fn summary(pool: &PgPool, row: RecipeRow) -> Result<RecipeSummary, sqlx::Error> {
        let id = row.recipe.id;
        let mut ingredients = links::load_links(pool, &RECIPE_INGREDIENTS, &[id]).await?;
        let mut tags = links::load_links(pool, &RECIPE_TAGS, &[id]).await?;
        Ok(RecipeSummary::new(
            row,
            ingredients.remove(&id).unwrap_or_default(),
            tags.remove(&id).unwrap_or_default(),
        ))
    }

    /// Expand a recipe row into its detail shape, including the gallery.
    pub async fn detail(pool: &PgPool, row: RecipeRow) -> Result<RecipeDetail, sqlx::Error> {
        let images = RecipeImageRepo::list_for_recipe(pool, row.recipe.id).await?;
        let summary = Self::summary(pool, row).await?;
        Ok(RecipeDetail { summary, images })
    }

    /// One page of recipes visible to `viewer` that match `filter`.
    ///
    /// The requested page is resolved against the match count first, so an
    /// out-of-range request is served the nearest valid page.
    pub async fn list_page(
        pool: &PgPool,
        filter: &RecipeFilter,
        viewer: Option<DbId>,
        requested_page: Option<&str>,
    ) -> Result<(Vec<RecipeSummary>, Page), sqlx::Error> {
        let count_query = format!(
            "SELECT COUNT(*) FROM recipes r LEFT JOIN chefs c ON c.id = r.chef_id {FILTER_SQL}"
        );
        let count = sqlx::query_scalar::<_, i64>(&count_query)
            .bind(filter.tag.as_deref())
            .bind(filter.ingredient.as_deref())
            .bind(filter.chef_pattern.as_deref())
            .bind(filter.title_pattern.as_deref())
            .bind(filter.difficulty)
            .bind(viewer)
            .fetch_one(pool)
            .await?;

        let page = Page::resolve(requested_page, count, RECIPES_PER_PAGE);

        let query = format!("{ROW_SELECT} {FILTER_SQL} {ORDER_SQL} LIMIT $7 OFFSET $8");
        let rows = sqlx::query_as::<_, RecipeRow>(&query)
            .bind(filter.tag.as_deref())
            .bind(filter.ingredient.as_deref())
            .bind(filter.chef_pattern.as_deref())
            .bind(filter.title_pattern.as_deref())
            .bind(filter.difficulty)
            .bind(viewer)
            .bind(page.limit())
            .bind(page.offset())
            .fetch_all(pool)
            .await?;

        Ok((Self::summaries(pool, rows).await?, page))
    }

    /// Every recipe written by the account's chef profile, public or not.
    pub async fn list_by_user(
        pool: &PgPool,
        user_id: DbId,
    ) -> Result<Vec<RecipeSummary>, sqlx::Error> {
        let query = format!("{ROW_SELECT} WHERE c.user_id = $1 {ORDER_SQL}");
        let rows = sqlx::query_as::<_, RecipeRow>(&query)
            .bind(user_id)
            .fetch_all(pool)
            .await?;
        Self::summaries(pool, rows).await
    }

    /// Public recipes by one chef, plus private ones when `viewer` owns them.
    pub async fn list_by_chef(
        pool: &PgPool,
        chef_id: DbId,
        viewer: Option<DbId>,
    ) -> Result<Vec<RecipeSummary>, sqlx::Error> {
        let query = format!(
            "{ROW_SELECT}
             WHERE r.chef_id = $1
               AND (r.is_public OR ($2::bigint IS NOT NULL AND c.user_id = $2))
             {ORDER_SQL}"
        );
        let rows = sqlx::query_as::<_, RecipeRow>(&query)
            .bind(chef_id)
            .bind(viewer)
            .fetch_all(pool)
            .await?;
        Self::summaries(pool, rows).await
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    /// Attach ingredients and tags with one query per relation.
    async fn summaries(
        pool: &PgPool,
        rows: Vec<RecipeRow>,
    ) -> Result<Vec<RecipeSummary>, sqlx::Error> {
        let ids: Vec<DbId> = rows.iter().map(|r| r.recipe.id).collect();
        let mut ingredients = links::load_links(pool, &RECIPE_INGREDIENTS, &ids).await?;
        let mut tags = links::load_links(pool, &RECIPE_TAGS, &ids).await?;

        Ok(rows
            .into_iter()
            .map(|row| {
                let id = row.recipe.id;
                RecipeSummary::new(
                    row,
                    ingredients.remove(&id).unwrap_or_default(),
                    tags.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }
}
