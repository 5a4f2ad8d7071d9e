//! Handlers for the `/authors` resource.
//!
//! Reads are public; every mutation requires an authenticated caller.
//! Deleting an author deletes their books.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use pantry_core::search::optional_contains;
use pantry_core::types::DbId;
use pantry_db::models::author::{Author, AuthorForm, AuthorResponse};
use pantry_db::models::book::{BookDetail, BookFilter};
use pantry_db::repositories::{AuthorRepo, BookRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathId};
use crate::forms::FormErrors;
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::response::{created, see_other, DataResponse, DeleteConfirmation, FormView};
use crate::state::AppState;

const LIST_URL: &str = "/authors";

/// An author with their books.
#[derive(Debug, Serialize)]
pub struct AuthorDetail {
    #[serde(flatten)]
    pub author: AuthorResponse,
    pub books: Vec<BookDetail>,
}

/// GET /authors?q=
///
/// `q` matches first or last name.
pub async fn list_authors(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let pattern = optional_contains(params.q.as_deref());
    let authors: Vec<AuthorResponse> = AuthorRepo::list(&state.pool, pattern.as_deref())
        .await?
        .into_iter()
        .map(AuthorResponse::from)
        .collect();
    Ok(Json(DataResponse { data: authors }))
}

/// GET /authors/{id}
pub async fn get_author(
    State(state): State<AppState>,
    PathId(author_id): PathId,
) -> AppResult<impl IntoResponse> {
    let author = find_author(&state, author_id).await?;
    let books = BookRepo::list(
        &state.pool,
        &BookFilter {
            author_id: Some(author_id),
            ..Default::default()
        },
    )
    .await?;

    Ok(Json(DataResponse {
        data: AuthorDetail {
            author: author.into(),
            books,
        },
    }))
}

/// GET /authors/add
pub async fn add_form(_auth: AuthUser) -> Json<DataResponse<AuthorForm>> {
    Json(DataResponse {
        data: AuthorForm::default(),
    })
}

/// POST /authors/add
pub async fn add_author(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(mut form): JsonBody<AuthorForm>,
) -> AppResult<Response> {
    check_form(&mut form)?;

    let author = AuthorRepo::create(&state.pool, &form).await?;
    tracing::info!(author_id = author.id, user_id = auth.user_id, "Author created");

    Ok(created(
        &format!("{LIST_URL}/{}", author.id),
        AuthorResponse::from(author),
    ))
}

/// GET /authors/{id}/edit
pub async fn edit_form(
    _auth: AuthUser,
    State(state): State<AppState>,
    PathId(author_id): PathId,
) -> AppResult<impl IntoResponse> {
    let author = find_author(&state, author_id).await?;
    Ok(Json(DataResponse {
        data: FormView {
            id: author_id,
            form: AuthorForm::from(&author),
        },
    }))
}

/// POST /authors/{id}/edit
pub async fn edit_author(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(author_id): PathId,
    JsonBody(mut form): JsonBody<AuthorForm>,
) -> AppResult<impl IntoResponse> {
    find_author(&state, author_id).await?;
    check_form(&mut form)?;

    let author = AuthorRepo::update(&state.pool, author_id, &form)
        .await?
        .ok_or_else(|| AppError::not_found("Author", author_id))?;

    tracing::info!(author_id, user_id = auth.user_id, "Author updated");

    Ok(Json(DataResponse {
        data: AuthorResponse::from(author),
    }))
}

/// GET /authors/{id}/delete
pub async fn delete_confirmation(
    _auth: AuthUser,
    State(state): State<AppState>,
    PathId(author_id): PathId,
) -> AppResult<impl IntoResponse> {
    let author = find_author(&state, author_id).await?;
    Ok(Json(DataResponse {
        data: DeleteConfirmation::new(author_id, author.display_name()),
    }))
}

/// POST /authors/{id}/delete
pub async fn delete_author(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(author_id): PathId,
) -> AppResult<Response> {
    if !AuthorRepo::delete(&state.pool, author_id).await? {
        return Err(AppError::not_found("Author", author_id));
    }

    tracing::info!(author_id, user_id = auth.user_id, "Author deleted");

    Ok(see_other(LIST_URL))
}

async fn find_author(state: &AppState, author_id: DbId) -> AppResult<Author> {
    AuthorRepo::find_by_id(&state.pool, author_id)
        .await?
        .ok_or_else(|| AppError::not_found("Author", author_id))
}

fn check_form(form: &mut AuthorForm) -> AppResult<()> {
    form.first_name = form.first_name.trim().to_string();
    form.last_name = form.last_name.trim().to_string();
    FormErrors::validate(&*form).finish()
}
