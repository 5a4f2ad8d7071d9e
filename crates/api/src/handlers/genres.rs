//! Handlers for the book `/genres` resource.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use pantry_core::search::optional_contains;
use pantry_core::types::DbId;
use pantry_db::models::book::{BookDetail, BookFilter};
use pantry_db::models::genre::{Genre, GenreForm};
use pantry_db::repositories::{BookRepo, GenreRepo};
use serde::Serialize;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathId};
use crate::forms::FormErrors;
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::response::{created, see_other, DataResponse, DeleteConfirmation, FormView};
use crate::state::AppState;

const LIST_URL: &str = "/genres";

/// A genre with the books filed under it.
#[derive(Debug, Serialize)]
pub struct GenreDetail {
    #[serde(flatten)]
    pub genre: Genre,
    pub books: Vec<BookDetail>,
}

/// GET /genres?q=
pub async fn list_genres(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let pattern = optional_contains(params.q.as_deref());
    let genres = GenreRepo::list(&state.pool, pattern.as_deref()).await?;
    Ok(Json(DataResponse { data: genres }))
}

/// GET /genres/{id}
pub async fn get_genre(
    State(state): State<AppState>,
    PathId(genre_id): PathId,
) -> AppResult<impl IntoResponse> {
    let genre = find_genre(&state.pool, genre_id).await?;
    let books = BookRepo::list(
        &state.pool,
        &BookFilter {
            genre_id: Some(genre_id),
            ..Default::default()
        },
    )
    .await?;

    Ok(Json(DataResponse {
        data: GenreDetail { genre, books },
    }))
}

/// GET /genres/add
pub async fn add_form(_auth: AuthUser) -> Json<DataResponse<GenreForm>> {
    Json(DataResponse {
        data: GenreForm::default(),
    })
}

/// POST /genres/add
pub async fn add_genre(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(mut form): JsonBody<GenreForm>,
) -> AppResult<Response> {
    check_form(&state.pool, &mut form, None).await?;

    let genre = GenreRepo::create(&state.pool, &form).await?;
    tracing::info!(genre_id = genre.id, user_id = auth.user_id, "Genre created");

    Ok(created(&format!("{LIST_URL}/{}", genre.id), genre))
}

/// GET /genres/{id}/edit
pub async fn edit_form(
    _auth: AuthUser,
    State(state): State<AppState>,
    PathId(genre_id): PathId,
) -> AppResult<impl IntoResponse> {
    let genre = find_genre(&state.pool, genre_id).await?;
    Ok(Json(DataResponse {
        data: FormView {
            id: genre_id,
            form: GenreForm { name: genre.name },
        },
    }))
}

/// POST /genres/{id}/edit
pub async fn edit_genre(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(genre_id): PathId,
    JsonBody(mut form): JsonBody<GenreForm>,
) -> AppResult<impl IntoResponse> {
    find_genre(&state.pool, genre_id).await?;
    check_form(&state.pool, &mut form, Some(genre_id)).await?;

    let genre = GenreRepo::update(&state.pool, genre_id, &form)
        .await?
        .ok_or_else(|| AppError::not_found("Genre", genre_id))?;

    tracing::info!(genre_id, user_id = auth.user_id, "Genre updated");

    Ok(Json(DataResponse { data: genre }))
}

/// GET /genres/{id}/delete
pub async fn delete_confirmation(
    _auth: AuthUser,
    State(state): State<AppState>,
    PathId(genre_id): PathId,
) -> AppResult<impl IntoResponse> {
    let genre = find_genre(&state.pool, genre_id).await?;
    Ok(Json(DataResponse {
        data: DeleteConfirmation::new(genre_id, genre.name),
    }))
}

/// POST /genres/{id}/delete
pub async fn delete_genre(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(genre_id): PathId,
) -> AppResult<Response> {
    if !GenreRepo::delete(&state.pool, genre_id).await? {
        return Err(AppError::not_found("Genre", genre_id));
    }

    tracing::info!(genre_id, user_id = auth.user_id, "Genre deleted");

    Ok(see_other(LIST_URL))
}

async fn find_genre(pool: &PgPool, genre_id: DbId) -> AppResult<Genre> {
    GenreRepo::find_by_id(pool, genre_id)
        .await?
        .ok_or_else(|| AppError::not_found("Genre", genre_id))
}

async fn check_form(pool: &PgPool, form: &mut GenreForm, editing: Option<DbId>) -> AppResult<()> {
    form.name = form.name.trim().to_string();

    let mut errors = FormErrors::validate(&*form);
    if !errors.has("name") && GenreRepo::name_taken(pool, &form.name, editing).await? {
        errors.add("name", "Genre with this Name already exists.");
    }
    errors.finish()
}
