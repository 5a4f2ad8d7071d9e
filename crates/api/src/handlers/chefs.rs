//! Handlers for the `/chefs` resource. Read-only: chef profiles are created
//! at signup or on an account's first recipe.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use pantry_core::search::optional_contains;
use pantry_core::types::DbId;
use pantry_db::models::chef::Chef;
use pantry_db::models::recipe::RecipeSummary;
use pantry_db::repositories::{ChefRepo, RecipeRepo};
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::extract::PathId;
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// A chef with the recipes the caller may see.
#[derive(Debug, Serialize)]
pub struct ChefDetail {
    #[serde(flatten)]
    pub chef: Chef,
    pub recipes: Vec<RecipeSummary>,
}

/// GET /chefs?q=
pub async fn list_chefs(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let pattern = optional_contains(params.q.as_deref());
    let chefs = ChefRepo::list(&state.pool, pattern.as_deref()).await?;
    Ok(Json(DataResponse { data: chefs }))
}

/// GET /chefs/{id}
pub async fn get_chef(
    viewer: Option<AuthUser>,
    State(state): State<AppState>,
    PathId(chef_id): PathId,
) -> AppResult<impl IntoResponse> {
    let chef = find_chef(&state, chef_id).await?;
    let recipes =
        RecipeRepo::list_by_chef(&state.pool, chef_id, viewer.map(|v| v.user_id)).await?;

    Ok(Json(DataResponse {
        data: ChefDetail { chef, recipes },
    }))
}

/// GET /chefs/{id}/ingredients
///
/// Each ingredient the chef has used, once, by name.
pub async fn chef_ingredients(
    State(state): State<AppState>,
    PathId(chef_id): PathId,
) -> AppResult<impl IntoResponse> {
    find_chef(&state, chef_id).await?;
    let ingredients = ChefRepo::ingredients_used(&state.pool, chef_id).await?;
    Ok(Json(DataResponse { data: ingredients }))
}

async fn find_chef(state: &AppState, chef_id: DbId) -> AppResult<Chef> {
    ChefRepo::find_by_id(&state.pool, chef_id)
        .await?
        .ok_or_else(|| AppError::not_found("Chef", chef_id))
}
