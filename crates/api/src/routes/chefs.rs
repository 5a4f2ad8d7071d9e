//! Route definitions for the `/chefs` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::chefs;
use crate::state::AppState;

/// Routes mounted at `/chefs`.
///
/// ```text
/// GET /                   -> list_chefs
/// GET /{id}               -> get_chef
/// GET /{id}/ingredients   -> chef_ingredients
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(chefs::list_chefs))
        .route("/{id}", get(chefs::get_chef))
        .route("/{id}/ingredients", get(chefs::chef_ingredients))
}
