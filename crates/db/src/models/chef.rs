//! Chef profile model.

use pantry_core::types::{DbId, Timestamp};
use serde::Serialize;
use sqlx::FromRow;

/// A row from the `chefs` table. `user_id` links the profile to an account;
/// chefs created from data entry may have none.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Chef {
    pub id: DbId,
    pub user_id: Option<DbId>,
    pub name: String,
    pub bio: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A chef with the number of recipes they have written.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct ChefSummary {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub chef: Chef,
    pub recipe_count: i64,
}
