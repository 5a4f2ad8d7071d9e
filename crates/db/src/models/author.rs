//! Author entity model and form.

use pantry_core::catalog::author_display;
use pantry_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A row from the `authors` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Author {
    pub id: DbId,
    pub first_name: String,
    pub last_name: String,
    pub birth_year: Option<i32>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Author {
    pub fn display_name(&self) -> String {
        author_display(&self.first_name, &self.last_name)
    }
}

/// Author as returned by the API, with its display name.
#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    #[serde(flatten)]
    pub author: Author,
    pub display_name: String,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        let display_name = author.display_name();
        Self {
            author,
            display_name,
        }
    }
}

/// Body of the author add/edit form.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct AuthorForm {
    #[validate(length(min = 1, max = 100, message = "Enter a first name of at most 100 characters."))]
    pub first_name: String,
    #[validate(length(min = 1, max = 100, message = "Enter a last name of at most 100 characters."))]
    pub last_name: String,
    pub birth_year: Option<i32>,
}

impl From<&Author> for AuthorForm {
    fn from(author: &Author) -> Self {
        Self {
            first_name: author.first_name.clone(),
            last_name: author.last_name.clone(),
            birth_year: author.birth_year,
        }
    }
}
