//! Handlers for the `/publishers` resource.
//!
//! Publisher names are unique. Deleting a publisher keeps its books and
//! clears their publisher.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use pantry_core::search::optional_contains;
use pantry_core::types::DbId;
use pantry_db::models::publisher::{Publisher, PublisherForm};
use pantry_db::repositories::PublisherRepo;
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathId};
use crate::forms::FormErrors;
use crate::middleware::auth::AuthUser;
use crate::query::SearchParams;
use crate::response::{created, see_other, DataResponse, DeleteConfirmation, FormView};
use crate::state::AppState;

const LIST_URL: &str = "/publishers";

/// GET /publishers?q=
pub async fn list_publishers(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> AppResult<impl IntoResponse> {
    let pattern = optional_contains(params.q.as_deref());
    let publishers = PublisherRepo::list(&state.pool, pattern.as_deref()).await?;
    Ok(Json(DataResponse { data: publishers }))
}

/// GET /publishers/{id}
pub async fn get_publisher(
    State(state): State<AppState>,
    PathId(publisher_id): PathId,
) -> AppResult<impl IntoResponse> {
    let publisher = find_publisher(&state.pool, publisher_id).await?;
    Ok(Json(DataResponse { data: publisher }))
}

/// GET /publishers/add
pub async fn add_form(_auth: AuthUser) -> Json<DataResponse<PublisherForm>> {
    Json(DataResponse {
        data: PublisherForm::default(),
    })
}

/// POST /publishers/add
pub async fn add_publisher(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(mut form): JsonBody<PublisherForm>,
) -> AppResult<Response> {
    check_form(&state.pool, &mut form, None).await?;

    let publisher = PublisherRepo::create(&state.pool, &form).await?;
    tracing::info!(publisher_id = publisher.id, user_id = auth.user_id, "Publisher created");

    Ok(created(&format!("{LIST_URL}/{}", publisher.id), publisher))
}

/// GET /publishers/{id}/edit
pub async fn edit_form(
    _auth: AuthUser,
    State(state): State<AppState>,
    PathId(publisher_id): PathId,
) -> AppResult<impl IntoResponse> {
    let publisher = find_publisher(&state.pool, publisher_id).await?;
    Ok(Json(DataResponse {
        data: FormView {
            id: publisher_id,
            form: PublisherForm::from(&publisher),
        },
    }))
}

/// POST /publishers/{id}/edit
pub async fn edit_publisher(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(publisher_id): PathId,
    JsonBody(mut form): JsonBody<PublisherForm>,
) -> AppResult<impl IntoResponse> {
    find_publisher(&state.pool, publisher_id).await?;
    check_form(&state.pool, &mut form, Some(publisher_id)).await?;

    let publisher = PublisherRepo::update(&state.pool, publisher_id, &form)
        .await?
        .ok_or_else(|| AppError::not_found("Publisher", publisher_id))?;

    tracing::info!(publisher_id, user_id = auth.user_id, "Publisher updated");

    Ok(Json(DataResponse { data: publisher }))
}

/// GET /publishers/{id}/delete
pub async fn delete_confirmation(
    _auth: AuthUser,
    State(state): State<AppState>,
    PathId(publisher_id): PathId,
) -> AppResult<impl IntoResponse> {
    let publisher = find_publisher(&state.pool, publisher_id).await?;
    Ok(Json(DataResponse {
        data: DeleteConfirmation::new(publisher_id, publisher.name),
    }))
}

/// POST /publishers/{id}/delete
pub async fn delete_publisher(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(publisher_id): PathId,
) -> AppResult<Response> {
    if !PublisherRepo::delete(&state.pool, publisher_id).await? {
        return Err(AppError::not_found("Publisher", publisher_id));
    }

    tracing::info!(publisher_id, user_id = auth.user_id, "Publisher deleted");

    Ok(see_other(LIST_URL))
}

async fn find_publisher(pool: &PgPool, publisher_id: DbId) -> AppResult<Publisher> {
    PublisherRepo::find_by_id(pool, publisher_id)
        .await?
        .ok_or_else(|| AppError::not_found("Publisher", publisher_id))
}

async fn check_form(
    pool: &PgPool,
    form: &mut PublisherForm,
    editing: Option<DbId>,
) -> AppResult<()> {
    form.name = form.name.trim().to_string();
    form.city = form.city.trim().to_string();
    form.country = form.country.trim().to_string();

    let mut errors = FormErrors::validate(&*form);
    if !errors.has("name") && PublisherRepo::name_taken(pool, &form.name, editing).await? {
        errors.add("name", "Publisher with this Name already exists.");
    }
    errors.finish()
}
