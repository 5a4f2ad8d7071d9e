//! Handlers for `/api/movies`.
//!
//! Bodies are bare JSON rather than the `{ "data": ... }` envelope. Writes
//! accept genres by name; unknown names are created.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pantry_core::types::DbId;
use pantry_db::models::movie::{Movie, MovieForm, MoviePatch, MovieResponse};
use pantry_db::repositories::MovieRepo;
use sqlx::PgPool;
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathId};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// GET /api/movies
pub async fn list_movies(State(state): State<AppState>) -> AppResult<Json<Vec<MovieResponse>>> {
    let movies = MovieRepo::list(&state.pool).await?;
    Ok(Json(MovieRepo::responses(&state.pool, movies).await?))
}

/// GET /api/movies/{id}
pub async fn get_movie(
    State(state): State<AppState>,
    PathId(movie_id): PathId,
) -> AppResult<Json<MovieResponse>> {
    let movie = find_movie(&state.pool, movie_id).await?;
    Ok(Json(MovieRepo::response(&state.pool, movie).await?))
}

/// POST /api/movies
pub async fn create_movie(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(mut form): JsonBody<MovieForm>,
) -> AppResult<impl IntoResponse> {
    normalize(&mut form);
    form.validate()?;

    let movie = MovieRepo::create(&state.pool, &form).await?;
    tracing::info!(movie_id = movie.id, user_id = auth.user_id, "Movie created");

    let response = MovieRepo::response(&state.pool, movie).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// PUT /api/movies/{id}
pub async fn update_movie(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(movie_id): PathId,
    JsonBody(form): JsonBody<MovieForm>,
) -> AppResult<Json<MovieResponse>> {
    find_movie(&state.pool, movie_id).await?;
    save(&state, movie_id, form, &auth).await
}

/// PATCH /api/movies/{id}
///
/// Absent fields keep their stored values; a present `genres` replaces the
/// whole set.
pub async fn patch_movie(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(movie_id): PathId,
    JsonBody(patch): JsonBody<MoviePatch>,
) -> AppResult<Json<MovieResponse>> {
    patch.validate()?;

    let movie = find_movie(&state.pool, movie_id).await?;
    let current = MovieRepo::response(&state.pool, movie.clone()).await?;
    let form = patch.merge(&movie, &current.genres);

    save(&state, movie_id, form, &auth).await
}

/// DELETE /api/movies/{id}
pub async fn delete_movie(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(movie_id): PathId,
) -> AppResult<StatusCode> {
    if !MovieRepo::delete(&state.pool, movie_id).await? {
        return Err(AppError::not_found("Movie", movie_id));
    }

    tracing::info!(movie_id, user_id = auth.user_id, "Movie deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn save(
    state: &AppState,
    movie_id: DbId,
    mut form: MovieForm,
    auth: &AuthUser,
) -> AppResult<Json<MovieResponse>> {
    normalize(&mut form);
    form.validate()?;

    let movie = MovieRepo::update(&state.pool, movie_id, &form)
        .await?
        .ok_or_else(|| AppError::not_found("Movie", movie_id))?;

    tracing::info!(movie_id, user_id = auth.user_id, "Movie updated");

    Ok(Json(MovieRepo::response(&state.pool, movie).await?))
}

async fn find_movie(pool: &PgPool, movie_id: DbId) -> AppResult<Movie> {
    MovieRepo::find_by_id(pool, movie_id)
        .await?
        .ok_or_else(|| AppError::not_found("Movie", movie_id))
}

fn normalize(form: &mut MovieForm) {
    form.title = form.title.trim().to_string();
    for genre in &mut form.genres {
        genre.name = genre.name.trim().to_string();
    }
    form.poster = form.poster.take().filter(|p| !p.trim().is_empty());
}
