//! Route definitions for the book catalog.
//!
//! Every catalog resource has the same shape:
//!
//! ```text
//! GET      /              -> list
//! GET|POST /add           -> empty form, create
//! GET      /{id}          -> detail
//! GET|POST /{id}/edit     -> current form, update
//! GET|POST /{id}/delete   -> confirmation, delete
//! ```

use axum::routing::get;
use axum::Router;

use crate::handlers::{authors, books, genres, publishers};
use crate::state::AppState;

/// Routes mounted at `/books`.
pub fn books_router() -> Router<AppState> {
    Router::new()
        .route("/", get(books::list_books))
        .route("/add", get(books::add_form).post(books::add_book))
        .route("/{id}", get(books::get_book))
        .route("/{id}/edit", get(books::edit_form).post(books::edit_book))
        .route(
            "/{id}/delete",
            get(books::delete_confirmation).post(books::delete_book),
        )
}

/// Routes mounted at `/authors`.
pub fn authors_router() -> Router<AppState> {
    Router::new()
        .route("/", get(authors::list_authors))
        .route("/add", get(authors::add_form).post(authors::add_author))
        .route("/{id}", get(authors::get_author))
        .route(
            "/{id}/edit",
            get(authors::edit_form).post(authors::edit_author),
        )
        .route(
            "/{id}/delete",
            get(authors::delete_confirmation).post(authors::delete_author),
        )
}

/// Routes mounted at `/publishers`.
pub fn publishers_router() -> Router<AppState> {
    Router::new()
        .route("/", get(publishers::list_publishers))
        .route(
            "/add",
            get(publishers::add_form).post(publishers::add_publisher),
        )
        .route("/{id}", get(publishers::get_publisher))
        .route(
            "/{id}/edit",
            get(publishers::edit_form).post(publishers::edit_publisher),
        )
        .route(
            "/{id}/delete",
            get(publishers::delete_confirmation).post(publishers::delete_publisher),
        )
}

/// Routes mounted at `/genres`.
pub fn genres_router() -> Router<AppState> {
    Router::new()
        .route("/", get(genres::list_genres))
        .route("/add", get(genres::add_form).post(genres::add_genre))
        .route("/{id}", get(genres::get_genre))
        .route("/{id}/edit", get(genres::edit_form).post(genres::edit_genre))
        .route(
            "/{id}/delete",
            get(genres::delete_confirmation).post(genres::delete_genre),
        )
}
