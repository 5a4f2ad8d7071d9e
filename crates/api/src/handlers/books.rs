//! Handlers for the `/books` resource.
//!
//! A book needs an existing author, an existing publisher when one is
//! given, and at least one existing genre. ISBNs are stored without
//! separators and are unique.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use pantry_core::catalog::normalize_isbn;
use pantry_core::search::optional_contains;
use pantry_core::types::DbId;
use pantry_db::models::book::{BookDetail, BookFilter, BookForm, BookInput, BookListParams};
use pantry_db::repositories::{AuthorRepo, BookRepo, GenreRepo, PublisherRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathId};
use crate::forms::{invalid_choice, FormErrors};
use crate::middleware::auth::AuthUser;
use crate::query::parse_filter;
use crate::response::{created, see_other, DataResponse, DeleteConfirmation, FormView};
use crate::state::AppState;

const LIST_URL: &str = "/books";

/// GET /books?q=&publication_year=&genre=
///
/// `q` matches title, author last name or ISBN. Filter values that do not
/// parse are ignored.
pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<BookListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = BookFilter {
        pattern: optional_contains(params.q.as_deref()),
        publication_year: parse_filter(params.publication_year.as_deref()),
        genre_id: parse_filter(params.genre.as_deref()),
        author_id: None,
    };
    let books = BookRepo::list(&state.pool, &filter).await?;
    Ok(Json(DataResponse { data: books }))
}

/// GET /books/{id}
pub async fn get_book(
    State(state): State<AppState>,
    PathId(book_id): PathId,
) -> AppResult<impl IntoResponse> {
    let book = find_book(&state.pool, book_id).await?;
    Ok(Json(DataResponse { data: book }))
}

/// GET /books/add
pub async fn add_form(_auth: AuthUser) -> Json<DataResponse<BookForm>> {
    Json(DataResponse {
        data: BookForm::default(),
    })
}

/// POST /books/add
pub async fn add_book(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(form): JsonBody<BookForm>,
) -> AppResult<Response> {
    let input = check_form(&state.pool, form, None).await?;

    let book = BookRepo::create(&state.pool, &input).await?;
    tracing::info!(book_id = book.id, isbn = %book.isbn, user_id = auth.user_id, "Book created");

    let detail = find_book(&state.pool, book.id).await?;
    Ok(created(&format!("{LIST_URL}/{}", book.id), detail))
}

/// GET /books/{id}/edit
pub async fn edit_form(
    _auth: AuthUser,
    State(state): State<AppState>,
    PathId(book_id): PathId,
) -> AppResult<impl IntoResponse> {
    let book = find_book(&state.pool, book_id).await?;
    Ok(Json(DataResponse {
        data: FormView {
            id: book_id,
            form: BookForm::from_detail(&book),
        },
    }))
}

/// POST /books/{id}/edit
pub async fn edit_book(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(book_id): PathId,
    JsonBody(form): JsonBody<BookForm>,
) -> AppResult<impl IntoResponse> {
    find_book(&state.pool, book_id).await?;
    let input = check_form(&state.pool, form, Some(book_id)).await?;

    BookRepo::update(&state.pool, book_id, &input)
        .await?
        .ok_or_else(|| AppError::not_found("Book", book_id))?;

    tracing::info!(book_id, user_id = auth.user_id, "Book updated");

    let detail = find_book(&state.pool, book_id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// GET /books/{id}/delete
pub async fn delete_confirmation(
    _auth: AuthUser,
    State(state): State<AppState>,
    PathId(book_id): PathId,
) -> AppResult<impl IntoResponse> {
    let book = find_book(&state.pool, book_id).await?;
    Ok(Json(DataResponse {
        data: DeleteConfirmation::new(book_id, book.display_name),
    }))
}

/// POST /books/{id}/delete
pub async fn delete_book(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(book_id): PathId,
) -> AppResult<Response> {
    if !BookRepo::delete(&state.pool, book_id).await? {
        return Err(AppError::not_found("Book", book_id));
    }

    tracing::info!(book_id, user_id = auth.user_id, "Book deleted");

    Ok(see_other(LIST_URL))
}

async fn find_book(pool: &PgPool, book_id: DbId) -> AppResult<BookDetail> {
    BookRepo::find_detail(pool, book_id)
        .await?
        .ok_or_else(|| AppError::not_found("Book", book_id))
}

/// Validate a submitted book against the catalog and turn it into the
/// repository input.
async fn check_form(
    pool: &PgPool,
    mut form: BookForm,
    editing: Option<DbId>,
) -> AppResult<BookInput> {
    form.title = form.title.trim().to_string();
    form.isbn = normalize_isbn(&form.isbn);
    form.genres.sort_unstable();
    form.genres.dedup();

    let mut errors = FormErrors::validate(&form);

    if let Some(author_id) = form.author {
        if AuthorRepo::find_by_id(pool, author_id).await?.is_none() {
            errors.add("author", invalid_choice(author_id));
        }
    }
    if let Some(publisher_id) = form.publisher {
        if PublisherRepo::find_by_id(pool, publisher_id).await?.is_none() {
            errors.add("publisher", invalid_choice(publisher_id));
        }
    }
    if !form.genres.is_empty() {
        let existing = GenreRepo::existing_ids(pool, &form.genres).await?;
        errors.require_choices("genres", &form.genres, &existing);
    }
    if !errors.has("isbn") && BookRepo::isbn_taken(pool, &form.isbn, editing).await? {
        errors.add("isbn", "Book with this Isbn already exists.");
    }

    errors.finish()?;

    match (form.author, form.publication_year) {
        (Some(author_id), Some(publication_year)) => Ok(BookInput {
            title: form.title,
            author_id,
            publisher_id: form.publisher,
            genre_ids: form.genres,
            publication_year,
            isbn: form.isbn,
        }),
        // Both are `required` above, so a clean form always has them.
        _ => Err(AppError::InternalError(
            "validated book form is missing required fields".into(),
        )),
    }
}
