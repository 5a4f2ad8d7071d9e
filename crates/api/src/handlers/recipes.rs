//! Handlers for the `/recipes` resource.
//!
//! Listing and detail are public but respect `is_public`: private recipes
//! are only visible to the account that owns them. Edit and delete are
//! gated on ownership (recipe -> chef -> user) for both the GET and POST
//! halves.

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use pantry_core::recipes::{recipe_url, RecipeFilter, RECIPE_LIST_URL};
use pantry_core::types::DbId;
use pantry_db::models::recipe::{RecipeDetail, RecipeForm, RecipeListParams, RecipeRow};
use pantry_db::repositories::{ChefRepo, IngredientRepo, RecipeRepo, TagRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathId};
use crate::forms::FormErrors;
use crate::middleware::auth::AuthUser;
use crate::response::{created, see_other, DataResponse, DeleteConfirmation, FormView, PageResponse};
use crate::state::AppState;

/// Message for a caller acting on a recipe they do not own.
pub const NOT_OWNER: &str = "You do not have permission to modify this recipe.";

// ---------------------------------------------------------------------------
// Reads
// ---------------------------------------------------------------------------

/// GET /recipes?tag=&ingredient=&chef=&q=&difficulty=&page=
///
/// Every present filter narrows the result; blank ones are ignored. An
/// out-of-range `page` is served the nearest valid page.
pub async fn list_recipes(
    viewer: Option<AuthUser>,
    State(state): State<AppState>,
    Query(params): Query<RecipeListParams>,
) -> AppResult<impl IntoResponse> {
    let filter = RecipeFilter::new(
        params.tag.as_deref(),
        params.ingredient.as_deref(),
        params.chef.as_deref(),
        params.q.as_deref(),
        params.difficulty.as_deref(),
    );

    let (recipes, page) = RecipeRepo::list_page(
        &state.pool,
        &filter,
        viewer.map(|v| v.user_id),
        params.page.as_deref(),
    )
    .await?;

    Ok(Json(PageResponse {
        data: recipes,
        page,
    }))
}

/// GET /recipes/{id}
pub async fn get_recipe(
    viewer: Option<AuthUser>,
    State(state): State<AppState>,
    PathId(recipe_id): PathId,
) -> AppResult<impl IntoResponse> {
    let row = RecipeRepo::find_row(&state.pool, recipe_id)
        .await?
        .filter(|row| row.is_visible_to(viewer.as_ref().map(|v| v.user_id)))
        .ok_or_else(|| AppError::not_found("Recipe", recipe_id))?;

    let detail = RecipeRepo::detail(&state.pool, row).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// GET /recipes/mine
///
/// The caller's own recipes, public and private.
pub async fn my_recipes(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let recipes = RecipeRepo::list_by_user(&state.pool, auth.user_id).await?;
    Ok(Json(DataResponse { data: recipes }))
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

/// GET /recipes/add
///
/// Initial values of an empty recipe form.
pub async fn add_form(_auth: AuthUser) -> Json<DataResponse<RecipeForm>> {
    Json(DataResponse {
        data: RecipeForm::default(),
    })
}

/// POST /recipes/add
///
/// The recipe is written under the caller's chef profile, which is created
/// on first use.
pub async fn add_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(mut form): JsonBody<RecipeForm>,
) -> AppResult<Response> {
    check_recipe_form(&state.pool, &mut form).await?;

    let chef = ChefRepo::find_or_create_for_user(&state.pool, auth.user_id, &auth.username).await?;
    let recipe = RecipeRepo::create(&state.pool, chef.id, &form).await?;

    tracing::info!(
        recipe_id = recipe.id,
        chef_id = chef.id,
        user_id = auth.user_id,
        "Recipe created",
    );

    let detail = load_detail(&state.pool, recipe.id).await?;
    Ok(created(&recipe_url(recipe.id), detail))
}

// ---------------------------------------------------------------------------
// Edit / delete (owner only)
// ---------------------------------------------------------------------------

/// GET /recipes/{id}/edit
pub async fn edit_form(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(recipe_id): PathId,
) -> AppResult<impl IntoResponse> {
    let row = owned_recipe(&state.pool, recipe_id, &auth).await?;
    let summary = RecipeRepo::summary(&state.pool, row).await?;

    Ok(Json(DataResponse {
        data: FormView {
            id: recipe_id,
            form: RecipeForm::from(&summary),
        },
    }))
}

/// POST /recipes/{id}/edit
pub async fn edit_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(recipe_id): PathId,
    JsonBody(mut form): JsonBody<RecipeForm>,
) -> AppResult<impl IntoResponse> {
    owned_recipe(&state.pool, recipe_id, &auth).await?;
    check_recipe_form(&state.pool, &mut form).await?;

    RecipeRepo::update(&state.pool, recipe_id, &form)
        .await?
        .ok_or_else(|| AppError::not_found("Recipe", recipe_id))?;

    tracing::info!(recipe_id, user_id = auth.user_id, "Recipe updated");

    let detail = load_detail(&state.pool, recipe_id).await?;
    Ok(Json(DataResponse { data: detail }))
}

/// GET /recipes/{id}/delete
///
/// Describe what would be deleted. Nothing is removed.
pub async fn delete_confirmation(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(recipe_id): PathId,
) -> AppResult<impl IntoResponse> {
    let row = owned_recipe(&state.pool, recipe_id, &auth).await?;

    Ok(Json(DataResponse {
        data: DeleteConfirmation::new(recipe_id, row.recipe.title),
    }))
}

/// POST /recipes/{id}/delete
///
/// Delete the recipe and redirect to the listing.
pub async fn delete_recipe(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(recipe_id): PathId,
) -> AppResult<Response> {
    owned_recipe(&state.pool, recipe_id, &auth).await?;

    if !RecipeRepo::delete(&state.pool, recipe_id).await? {
        return Err(AppError::not_found("Recipe", recipe_id));
    }

    tracing::info!(recipe_id, user_id = auth.user_id, "Recipe deleted");

    Ok(see_other(RECIPE_LIST_URL))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Load a recipe the caller owns: 404 if it does not exist, 403 if its chef
/// is missing, unlinked, or linked to another account.
pub(crate) async fn owned_recipe(
    pool: &PgPool,
    recipe_id: DbId,
    auth: &AuthUser,
) -> AppResult<RecipeRow> {
    let row = RecipeRepo::find_row(pool, recipe_id)
        .await?
        .ok_or_else(|| AppError::not_found("Recipe", recipe_id))?;

    if !row.is_owned_by(auth.user_id) {
        tracing::warn!(recipe_id, user_id = auth.user_id, "Recipe ownership check failed");
        return Err(AppError::forbidden(NOT_OWNER));
    }
    Ok(row)
}

pub(crate) async fn load_detail(pool: &PgPool, recipe_id: DbId) -> AppResult<RecipeDetail> {
    let row = RecipeRepo::find_row(pool, recipe_id)
        .await?
        .ok_or_else(|| AppError::not_found("Recipe", recipe_id))?;
    Ok(RecipeRepo::detail(pool, row).await?)
}

/// Normalize and validate a submitted recipe, including that every
/// referenced ingredient and tag exists.
async fn check_recipe_form(pool: &PgPool, form: &mut RecipeForm) -> AppResult<()> {
    form.title = form.title.trim().to_string();
    form.ingredients.sort_unstable();
    form.ingredients.dedup();
    form.tags.sort_unstable();
    form.tags.dedup();

    let mut errors = FormErrors::validate(&*form);

    if !form.ingredients.is_empty() {
        let existing = IngredientRepo::existing_ids(pool, &form.ingredients).await?;
        errors.require_choices("ingredients", &form.ingredients, &existing);
    }
    if !form.tags.is_empty() {
        let existing = TagRepo::existing_ids(pool, &form.tags).await?;
        errors.require_choices("tags", &form.tags, &existing);
    }

    errors.finish()
}
