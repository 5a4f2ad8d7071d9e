//! Route definitions for the movie review API, mounted at `/api`.

use axum::routing::get;
use axum::Router;

use crate::handlers::{movie_genres, movies, reviews};
use crate::state::AppState;

/// Routes mounted at `/api`.
///
/// ```text
/// GET|POST                /movies        -> list_movies, create_movie
/// GET|PUT|PATCH|DELETE    /movies/{id}   -> get, update, patch, delete
/// GET|POST                /reviews       -> list_reviews (?movie=), create_review
/// GET|PUT|PATCH|DELETE    /reviews/{id}  -> get, update, patch, delete (reviewer only)
/// GET|POST                /genres        -> list_genres, create_genre
/// GET|PUT|PATCH|DELETE    /genres/{id}   -> get, update, patch, delete
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/movies",
            get(movies::list_movies).post(movies::create_movie),
        )
        .route(
            "/movies/{id}",
            get(movies::get_movie)
                .put(movies::update_movie)
                .patch(movies::patch_movie)
                .delete(movies::delete_movie),
        )
        .route(
            "/reviews",
            get(reviews::list_reviews).post(reviews::create_review),
        )
        .route(
            "/reviews/{id}",
            get(reviews::get_review)
                .put(reviews::update_review)
                .patch(reviews::patch_review)
                .delete(reviews::delete_review),
        )
        .route(
            "/genres",
            get(movie_genres::list_genres).post(movie_genres::create_genre),
        )
        .route(
            "/genres/{id}",
            get(movie_genres::get_genre)
                .put(movie_genres::update_genre)
                .patch(movie_genres::patch_genre)
                .delete(movie_genres::delete_genre),
        )
}
