//! Publisher entity model and form.

use pantry_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `publishers` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Publisher {
    pub id: DbId,
    pub name: String,
    pub city: String,
    pub country: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Body of the publisher add/edit form. Blank city/country are stored as
/// empty strings.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct PublisherForm {
    #[validate(length(min = 1, max = 150, message = "Enter a name of at most 150 characters."))]
    pub name: String,
    #[validate(length(max = 100, message = "Ensure this value has at most 100 characters."))]
    pub city: String,
    #[validate(length(max = 100, message = "Ensure this value has at most 100 characters."))]
    pub country: String,
}

impl From<&Publisher> for PublisherForm {
    fn from(publisher: &Publisher) -> Self {
        Self {
            name: publisher.name.clone(),
            city: publisher.city.clone(),
            country: publisher.country.clone(),
        }
    }
}
