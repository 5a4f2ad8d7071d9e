//! Repository for the `recipe_images` gallery table.

use pantry_core::types::DbId;
use sqlx::PgPool;

use crate::models::recipe::RecipeImage;

const COLUMNS: &str = "id, recipe_id, image, created_at, updated_at";

pub struct RecipeImageRepo;

impl RecipeImageRepo {
    /// Record a stored gallery image for a recipe.
    pub async fn create(
        pool: &PgPool,
        recipe_id: DbId,
        image: &str,
    ) -> Result<RecipeImage, sqlx::Error> {
        let query = format!(
            "INSERT INTO recipe_images (recipe_id, image) VALUES ($1, $2) RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, RecipeImage>(&query)
            .bind(recipe_id)
            .bind(image)
            .fetch_one(pool)
            .await
    }

    /// Record a batch of stored uploads in one transaction: each `gallery`
    /// path becomes a gallery row and `cover`, if given, replaces the
    /// recipe's own image.
    ///
    /// Returns the cover path that was replaced, so its file can be removed.
    pub async fn attach(
        pool: &PgPool,
        recipe_id: DbId,
        gallery: &[String],
        cover: Option<&str>,
    ) -> Result<Option<String>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let previous: Option<String> =
            sqlx::query_scalar("SELECT image FROM recipes WHERE id = $1 FOR UPDATE")
                .bind(recipe_id)
                .fetch_one(&mut *tx)
                .await?;

        for image in gallery {
            sqlx::query("INSERT INTO recipe_images (recipe_id, image) VALUES ($1, $2)")
                .bind(recipe_id)
                .bind(image)
                .execute(&mut *tx)
                .await?;
        }

        let replaced = match cover {
            Some(image) => {
                sqlx::query("UPDATE recipes SET image = $2 WHERE id = $1")
                    .bind(recipe_id)
                    .bind(image)
                    .execute(&mut *tx)
                    .await?;
                previous.filter(|old| old != image)
            }
            None => None,
        };

        tx.commit().await?;
        Ok(replaced)
    }

    /// A recipe's gallery, oldest first.
    pub async fn list_for_recipe(
        pool: &PgPool,
        recipe_id: DbId,
    ) -> Result<Vec<RecipeImage>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM recipe_images WHERE recipe_id = $1 ORDER BY created_at, id"
        );
        sqlx::query_as::<_, RecipeImage>(&query)
            .bind(recipe_id)
            .fetch_all(pool)
            .await
    }
}
