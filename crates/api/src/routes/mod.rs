pub mod auth;
pub mod books;
pub mod chefs;
pub mod health;
pub mod movies;
pub mod recipes;

use axum::routing::get;
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the site route tree.
///
/// Route hierarchy:
///
/// ```text
/// /                                        portfolio home
///
/// /auth/login                              login (public)
/// /auth/refresh                            refresh (public)
/// /auth/logout                             logout (requires auth)
/// /signup                                  form description, register
///
/// /recipes                                 filtered, paginated list
/// /recipes/mine                            caller's recipes
/// /recipes/add                             create
/// /recipes/{id}                            detail
/// /recipes/{id}/edit                       edit (owner only)
/// /recipes/{id}/delete                     delete (owner only)
/// /recipes/{id}/images                     photo upload (owner only)
/// /chefs, /chefs/{id}, /chefs/{id}/ingredients
/// /ingredients, /tags                      list, create
/// /stats                                   recipe statistics
///
/// /books, /authors, /publishers, /genres   catalog CRUD
///     /{res}/add, /{res}/{id}, /{res}/{id}/edit, /{res}/{id}/delete
///
/// /api/movies, /api/reviews, /api/genres   movie review API
///     /{res}/{id}  get, put, patch, delete
/// ```
pub fn app_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::home::home))
        .nest("/auth", auth::router())
        .route(
            "/signup",
            get(handlers::signup::signup_form).post(handlers::signup::signup),
        )
        // Recipes and their vocabulary.
        .nest("/recipes", recipes::router())
        .nest("/chefs", chefs::router())
        .merge(recipes::vocabulary_router())
        .route("/stats", get(handlers::stats::recipe_stats))
        // Book catalog.
        .nest("/books", books::books_router())
        .nest("/authors", books::authors_router())
        .nest("/publishers", books::publishers_router())
        .nest("/genres", books::genres_router())
        // Movie review API.
        .nest("/api", movies::router())
}
