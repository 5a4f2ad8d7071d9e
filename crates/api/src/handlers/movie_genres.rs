//! Handlers for `/api/genres`, the movie genre vocabulary.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pantry_core::types::DbId;
use pantry_db::models::movie::{MovieGenreForm, MovieGenrePatch};
use pantry_db::models::reference::NameRef;
use pantry_db::repositories::MovieGenreRepo;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathId};
use crate::forms::FormErrors;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/genres
pub async fn list_genres(State(state): State<AppState>) -> AppResult<Json<Vec<NameRef>>> {
    Ok(Json(MovieGenreRepo::list(&state.pool).await?))
}

/// GET /api/genres/{id}
pub async fn get_genre(
    State(state): State<AppState>,
    PathId(genre_id): PathId,
) -> AppResult<Json<NameRef>> {
    Ok(Json(find_genre(&state.pool, genre_id).await?))
}

/// POST /api/genres
pub async fn create_genre(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(form): JsonBody<MovieGenreForm>,
) -> AppResult<impl IntoResponse> {
    let name = check_name(&state.pool, &form.name, None).await?;

    let genre = MovieGenreRepo::create(&state.pool, &name).await?;
    tracing::info!(genre_id = genre.id, user_id = auth.user_id, "Movie genre created");

    Ok((StatusCode::CREATED, Json(genre)))
}

/// PUT /api/genres/{id}
pub async fn update_genre(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(genre_id): PathId,
    JsonBody(form): JsonBody<MovieGenreForm>,
) -> AppResult<Json<NameRef>> {
    find_genre(&state.pool, genre_id).await?;
    rename(&state.pool, genre_id, &form.name, &auth).await
}

/// PATCH /api/genres/{id}
pub async fn patch_genre(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(genre_id): PathId,
    JsonBody(patch): JsonBody<MovieGenrePatch>,
) -> AppResult<Json<NameRef>> {
    patch.validate()?;
    let genre = find_genre(&state.pool, genre_id).await?;
    match patch.name {
        Some(name) => rename(&state.pool, genre_id, &name, &auth).await,
        None => Ok(Json(genre)),
    }
}

/// DELETE /api/genres/{id}
pub async fn delete_genre(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(genre_id): PathId,
) -> AppResult<StatusCode> {
    if !MovieGenreRepo::delete(&state.pool, genre_id).await? {
        return Err(AppError::not_found("MovieGenre", genre_id));
    }

    tracing::info!(genre_id, user_id = auth.user_id, "Movie genre deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn rename(
    pool: &PgPool,
    genre_id: DbId,
    name: &str,
    auth: &AuthUser,
) -> AppResult<Json<NameRef>> {
    let name = check_name(pool, name, Some(genre_id)).await?;

    let genre = MovieGenreRepo::update(pool, genre_id, &name)
        .await?
        .ok_or_else(|| AppError::not_found("MovieGenre", genre_id))?;

    tracing::info!(genre_id, user_id = auth.user_id, "Movie genre renamed");

    Ok(Json(genre))
}

async fn find_genre(pool: &PgPool, genre_id: DbId) -> AppResult<NameRef> {
    MovieGenreRepo::find_by_id(pool, genre_id)
        .await?
        .ok_or_else(|| AppError::not_found("MovieGenre", genre_id))
}

/// Trim and validate a genre name, returning the value to store.
async fn check_name(pool: &PgPool, name: &str, editing: Option<DbId>) -> AppResult<String> {
    let form = MovieGenreForm {
        name: name.trim().to_string(),
    };

    let mut errors = FormErrors::validate(&form);
    if !errors.has("name") && MovieGenreRepo::name_taken(pool, &form.name, editing).await? {
        errors.add("name", "movie genre with this name already exists.");
    }
    errors.finish()?;

    Ok(form.name)
}
