//! Handlers for the `/tags` resource.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pantry_core::search::optional_contains;
use pantry_db::models::tag::TagForm;
use pantry_db::repositories::TagRepo;

use crate::error::AppResult;
use crate::extract::JsonBody;
use crate::forms::FormErrors;
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::response::DataResponse;
use crate::state::AppState;

/// GET /tags?q=
pub async fn list_tags(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let pattern = optional_contains(params.q.as_deref());
    let tags = TagRepo::list(&state.pool, pattern.as_deref()).await?;
    Ok(Json(DataResponse { data: tags }))
}

/// POST /tags
pub async fn create_tag(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(mut form): JsonBody<TagForm>,
) -> AppResult<impl IntoResponse> {
    form.name = form.name.trim().to_string();

    let mut errors = FormErrors::validate(&form);
    if !errors.has("name") && TagRepo::name_taken(&state.pool, &form.name).await? {
        errors.add("name", "Tag with this Name already exists.");
    }
    errors.finish()?;

    let tag = TagRepo::create(&state.pool, &form.name).await?;

    tracing::info!(tag_id = tag.id, user_id = auth.user_id, "Tag created");

    Ok((StatusCode::CREATED, Json(DataResponse { data: tag })))
}
