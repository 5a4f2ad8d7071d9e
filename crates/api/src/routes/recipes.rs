//! Route definitions for recipes and their ingredient/tag vocabulary.

use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{ingredients, recipes, tags, uploads};
use crate::state::AppState;

/// Routes mounted at `/recipes`.
///
/// ```text
/// GET      /              -> list_recipes
/// GET      /mine          -> my_recipes
/// GET|POST /add           -> add_form, add_recipe
/// GET      /{id}          -> get_recipe
/// GET|POST /{id}/edit     -> edit_form, edit_recipe (owner only)
/// GET|POST /{id}/delete   -> delete_confirmation, delete_recipe (owner only)
/// POST     /{id}/images   -> upload_images (owner only, multipart)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(recipes::list_recipes))
        .route("/mine", get(recipes::my_recipes))
        .route("/add", get(recipes::add_form).post(recipes::add_recipe))
        .route("/{id}", get(recipes::get_recipe))
        .route(
            "/{id}/edit",
            get(recipes::edit_form).post(recipes::edit_recipe),
        )
        .route(
            "/{id}/delete",
            get(recipes::delete_confirmation).post(recipes::delete_recipe),
        )
        .route("/{id}/images", post(uploads::upload_images))
}

/// Ingredient and tag routes, merged at the root.
///
/// ```text
/// GET|POST /ingredients   -> list_ingredients, create_ingredient
/// GET|POST /tags          -> list_tags, create_tag
/// ```
pub fn vocabulary_router() -> Router<AppState> {
    Router::new()
        .route(
            "/ingredients",
            get(ingredients::list_ingredients).post(ingredients::create_ingredient),
        )
        .route("/tags", get(tags::list_tags).post(tags::create_tag))
}
