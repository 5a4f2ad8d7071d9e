//! Book entity model, joined detail view and form.

use pantry_core::catalog::{author_display, book_display, ISBN_MAX_LENGTH};
use pantry_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::reference::NameRef;

/// A row from the `books` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    pub id: DbId,
    pub title: String,
    pub author_id: DbId,
    pub publisher_id: Option<DbId>,
    pub publication_year: i32,
    pub isbn: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A book joined with its author and publisher names.
#[derive(Debug, Clone, FromRow)]
pub struct BookRow {
    #[sqlx(flatten)]
    pub book: Book,
    pub author_first_name: String,
    pub author_last_name: String,
    pub publisher_name: Option<String>,
}

/// Book as shown in list and detail responses.
#[derive(Debug, Clone, Serialize)]
pub struct BookDetail {
    #[serde(flatten)]
    pub book: Book,
    pub display_name: String,
    pub author_name: String,
    pub publisher_name: Option<String>,
    pub genres: Vec<NameRef>,
}

impl BookDetail {
    pub fn new(row: BookRow, genres: Vec<NameRef>) -> Self {
        Self {
            display_name: book_display(&row.book.title, row.book.publication_year),
            author_name: author_display(&row.author_first_name, &row.author_last_name),
            publisher_name: row.publisher_name,
            book: row.book,
            genres,
        }
    }
}

/// Body of the book add/edit form.
///
/// `author` and `publication_year` are options so a missing value is
/// reported as a field error rather than a body-parse failure.
#[derive(Debug, Clone, Default, Deserialize, Serialize, Validate)]
#[serde(default)]
pub struct BookForm {
    #[validate(length(min = 1, max = 200, message = "Enter a title of at most 200 characters."))]
    pub title: String,
    #[validate(required(message = "This field is required."))]
    pub author: Option<DbId>,
    pub publisher: Option<DbId>,
    #[validate(length(min = 1, message = "Select at least one genre."))]
    pub genres: Vec<DbId>,
    #[validate(required(message = "This field is required."))]
    pub publication_year: Option<i32>,
    #[validate(length(
        min = 1,
        max = ISBN_MAX_LENGTH,
        message = "Enter an ISBN of at most 13 characters."
    ))]
    pub isbn: String,
}

impl BookForm {
    /// Build the edit form for an existing book.
    pub fn from_detail(detail: &BookDetail) -> Self {
        Self {
            title: detail.book.title.clone(),
            author: Some(detail.book.author_id),
            publisher: detail.book.publisher_id,
            genres: detail.genres.iter().map(|g| g.id).collect(),
            publication_year: Some(detail.book.publication_year),
            isbn: detail.book.isbn.clone(),
        }
    }
}

/// Validated book values ready to be written.
#[derive(Debug, Clone)]
pub struct BookInput {
    pub title: String,
    pub author_id: DbId,
    pub publisher_id: Option<DbId>,
    pub genre_ids: Vec<DbId>,
    pub publication_year: i32,
    pub isbn: String,
}

/// Query parameters for `GET /books`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BookListParams {
    pub q: Option<String>,
    pub publication_year: Option<String>,
    pub genre: Option<String>,
}

/// Normalized book list filters.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
    /// `ILIKE` pattern over title, author last name and ISBN.
    pub pattern: Option<String>,
    pub publication_year: Option<i32>,
    pub genre_id: Option<DbId>,
    pub author_id: Option<DbId>,
}
