//! Handlers for `/api/reviews`.
//!
//! The reviewer is always the authenticated caller and cannot be set by
//! the client. Only the reviewer may change or delete a review.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use pantry_core::types::DbId;
use pantry_db::models::review::{
    Review, ReviewForm, ReviewListParams, ReviewPatch, ReviewResponse,
};
use pantry_db::repositories::{MovieRepo, ReviewRepo};
use sqlx::PgPool;

use crate::error::{AppError, AppResult};
use crate::extract::{JsonBody, PathId};
use crate::forms::FormErrors;
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Message for a caller acting on someone else's review.
pub const NOT_REVIEWER: &str = "You do not have permission to perform this action.";

/// GET /api/reviews?movie=
pub async fn list_reviews(
    State(state): State<AppState>,
    Query(params): Query<ReviewListParams>,
) -> AppResult<Json<Vec<ReviewResponse>>> {
    let reviews = ReviewRepo::list(&state.pool, params.movie).await?;
    Ok(Json(reviews.into_iter().map(ReviewResponse::from).collect()))
}

/// GET /api/reviews/{id}
pub async fn get_review(
    State(state): State<AppState>,
    PathId(review_id): PathId,
) -> AppResult<Json<ReviewResponse>> {
    let review = find_review(&state.pool, review_id).await?;
    Ok(Json(review.into()))
}

/// POST /api/reviews
pub async fn create_review(
    auth: AuthUser,
    State(state): State<AppState>,
    JsonBody(form): JsonBody<ReviewForm>,
) -> AppResult<impl IntoResponse> {
    check_form(&state.pool, &form).await?;

    let review = ReviewRepo::create(&state.pool, auth.user_id, &form).await?;

    tracing::info!(
        review_id = review.id,
        movie_id = review.movie_id,
        user_id = auth.user_id,
        "Review created",
    );

    Ok((StatusCode::CREATED, Json(ReviewResponse::from(review))))
}

/// PUT /api/reviews/{id}
pub async fn update_review(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(review_id): PathId,
    JsonBody(form): JsonBody<ReviewForm>,
) -> AppResult<Json<ReviewResponse>> {
    own_review(&state.pool, review_id, &auth).await?;
    save(&state.pool, review_id, form, &auth).await
}

/// PATCH /api/reviews/{id}
pub async fn patch_review(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(review_id): PathId,
    JsonBody(patch): JsonBody<ReviewPatch>,
) -> AppResult<Json<ReviewResponse>> {
    let review = own_review(&state.pool, review_id, &auth).await?;
    save(&state.pool, review_id, patch.merge(&review), &auth).await
}

/// DELETE /api/reviews/{id}
pub async fn delete_review(
    auth: AuthUser,
    State(state): State<AppState>,
    PathId(review_id): PathId,
) -> AppResult<StatusCode> {
    own_review(&state.pool, review_id, &auth).await?;

    if !ReviewRepo::delete(&state.pool, review_id).await? {
        return Err(AppError::not_found("Review", review_id));
    }

    tracing::info!(review_id, user_id = auth.user_id, "Review deleted");

    Ok(StatusCode::NO_CONTENT)
}

async fn save(
    pool: &PgPool,
    review_id: DbId,
    form: ReviewForm,
    auth: &AuthUser,
) -> AppResult<Json<ReviewResponse>> {
    check_form(pool, &form).await?;

    let review = ReviewRepo::update(pool, review_id, &form)
        .await?
        .ok_or_else(|| AppError::not_found("Review", review_id))?;

    tracing::info!(review_id, user_id = auth.user_id, "Review updated");

    Ok(Json(review.into()))
}

async fn find_review(pool: &PgPool, review_id: DbId) -> AppResult<Review> {
    ReviewRepo::find_by_id(pool, review_id)
        .await?
        .ok_or_else(|| AppError::not_found("Review", review_id))
}

/// 404 if the review does not exist, 403 if the caller did not write it.
async fn own_review(pool: &PgPool, review_id: DbId, auth: &AuthUser) -> AppResult<Review> {
    let review = find_review(pool, review_id).await?;
    if review.reviewer_id != auth.user_id {
        return Err(AppError::forbidden(NOT_REVIEWER));
    }
    Ok(review)
}

async fn check_form(pool: &PgPool, form: &ReviewForm) -> AppResult<()> {
    let mut errors = FormErrors::validate(form);
    if !MovieRepo::exists(pool, form.movie).await? {
        errors.add(
            "movie",
            format!("Invalid pk \"{}\" - object does not exist.", form.movie),
        );
    }
    errors.finish()
}
