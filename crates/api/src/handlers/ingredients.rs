//! Handlers for the `/ingredients` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pantry_core::search::optional_contains;
use pantry_db::models::ingredient::IngredientForm;
use pantry_db::repositories::IngredientRepo;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::forms::FormErrors;
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /ingredients?q=
pub async fn list_ingredients(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let pattern = optional_contains(params.q.as_deref());
    let ingredients = IngredientRepo::list(&state.pool, pattern.as_deref()).await?;
    Ok(Json(DataResponse { data: ingredients }))
}

/// POST /ingredients
pub async fn create_ingredient(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(mut form): JsonBody<IngredientForm>,
) -> AppResult<impl IntoResponse> {
    form.name = form.name.trim().to_string();

    let mut errors = FormErrors::validate(&form);
    if !errors.has("name") && IngredientRepo::name_taken(&state.pool, &form.name).await? {
        errors.add("name", "Ingredient with this Name already exists.");
    }
    errors.finish()?;

    let ingredient = IngredientRepo::create(&state.pool, &form.name).await?;

    tracing::info!(ingredient_id = ingredient.id, user_id = auth.user_id, "Ingredient created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: ingredient })))
}
