//! Recipe entity model, list/detail views, gallery images and the recipe form.

use pantry_core::recipes::{recipe_url, Difficulty};
use pantry_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::reference::NameRef;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `recipes` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Recipe {
    pub id: DbId,
    pub title: String,
    pub chef_id: Option<DbId>,
    pub instructions: String,
    pub cook_time_in_minutes: i32,
    #[sqlx(try_from = "String")]
    pub difficulty: Difficulty,
    pub is_public: bool,
    pub image: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A recipe joined with its chef's name and the account that owns it.
#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    #[sqlx(flatten)]
    pub recipe: Recipe,
    pub chef_name: Option<String>,
    pub owner_user_id: Option<DbId>,
}

impl RecipeRow {
    /// Whether `user_id` owns this recipe through its chef profile.
    ///
    /// A recipe without a chef, or whose chef has no account, is owned by
    /// nobody.
    pub fn is_owned_by(&self, user_id: DbId) -> bool {
        self.owner_user_id == Some(user_id)
    }

    /// Whether `viewer` may see this recipe at all.
    pub fn is_visible_to(&self, viewer: Option<DbId>) -> bool {
        self.recipe.is_public || viewer.is_some_and(|id| self.is_owned_by(id))
    }
}

/// A row from the `recipe_images` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct RecipeImage {
    pub id: DbId,
    pub recipe_id: DbId,
    pub image: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// Recipe as shown in listings: the row plus its chef name, URL and
/// prefetched ingredients and tags.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeSummary {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub chef_name: Option<String>,
    pub difficulty_label: &'static str,
    pub url: String,
    pub ingredients: Vec<NameRef>,
    pub tags: Vec<NameRef>,
}

impl RecipeSummary {
    pub fn new(row: RecipeRow, ingredients: Vec<NameRef>, tags: Vec<NameRef>) -> Self {
        Self {
            chef_name: row.chef_name,
            difficulty_label: row.recipe.difficulty.label(),
            url: recipe_url(row.recipe.id),
            recipe: row.recipe,
            ingredients,
            tags,
        }
    }
}

/// Recipe detail: the summary plus its gallery.
#[derive(Debug, Clone, Serialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub summary: RecipeSummary,
    pub images: Vec<RecipeImage>,
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

fn default_true() -> bool {
    true
}

/// Body of the recipe add/edit form. The chef is never submitted; it is the
/// caller's own chef profile.
#[derive(Debug, Clone, Deserialize, Serialize, Validate)]
pub struct RecipeForm {
    #[serde(default)]
    #[validate(length(min = 1, max = 200, message = "Enter a title of at most 200 characters."))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, message = "This field is required."))]
    pub instructions: String,
    #[serde(default)]
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub cook_time_in_minutes: i32,
    #[serde(default)]
    pub difficulty: Difficulty,
    #[serde(default = "default_true")]
    pub is_public: bool,
    #[serde(default)]
    pub ingredients: Vec<DbId>,
    #[serde(default)]
    pub tags: Vec<DbId>,
}

impl Default for RecipeForm {
    fn default() -> Self {
        Self {
            title: String::new(),
            instructions: String::new(),
            cook_time_in_minutes: 0,
            difficulty: Difficulty::default(),
            is_public: true,
            ingredients: Vec::new(),
            tags: Vec::new(),
        }
    }
}

impl From<&RecipeSummary> for RecipeForm {
    fn from(summary: &RecipeSummary) -> Self {
        Self {
            title: summary.recipe.title.clone(),
            instructions: summary.recipe.instructions.clone(),
            cook_time_in_minutes: summary.recipe.cook_time_in_minutes,
            difficulty: summary.recipe.difficulty,
            is_public: summary.recipe.is_public,
            ingredients: summary.ingredients.iter().map(|i| i.id).collect(),
            tags: summary.tags.iter().map(|t| t.id).collect(),
        }
    }
}

/// Query parameters for `GET /recipes`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecipeListParams {
    pub tag: Option<String>,
    pub ingredient: Option<String>,
    pub chef: Option<String>,
    pub q: Option<String>,
    pub difficulty: Option<String>,
    pub page: Option<String>,
}
