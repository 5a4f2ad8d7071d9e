//! Handler for recipe statistics.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use pantry_core::recipes::TOP_RECIPES_BY_INGREDIENTS;
use pantry_db::repositories::StatsRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /stats
///
/// Recipe counts per chef, mean cook time, and the recipes using the most
/// ingredients. Computed over every recipe, private ones included.
pub async fn recipe_stats(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let stats = StatsRepo::collect(&state.pool, TOP_RECIPES_BY_INGREDIENTS).await?;
    Ok(Json(DataResponse { data: stats }))
}
