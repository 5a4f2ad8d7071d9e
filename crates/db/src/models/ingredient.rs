//! Ingredient model and form.

use pantry_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `ingredients` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Ingredient {
    pub id: DbId,
    pub name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct IngredientForm {
    #[validate(length(min = 1, max = 100, message = "Enter a name of at most 100 characters."))]
    pub name: String,
}
