//! Movie review model and payloads.

use pantry_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// A review joined with its reviewer's username.
#[derive(Debug, Clone, FromRow)]
pub struct Review {
    pub id: DbId,
    pub movie_id: DbId,
    pub reviewer_id: DbId,
    pub reviewer_username: String,
    pub rating: i16,
    pub comment: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Review as returned by the API. `reviewer` is the username and is never
/// writable.
#[derive(Debug, Clone, Serialize)]
pub struct ReviewResponse {
    pub id: DbId,
    pub movie: DbId,
    pub reviewer: String,
    pub rating: i16,
    pub comment: String,
    pub created_at: Timestamp,
}

impl From<Review> for ReviewResponse {
    fn from(review: Review) -> Self {
        Self {
            id: review.id,
            movie: review.movie_id,
            reviewer: review.reviewer_username,
            rating: review.rating,
            comment: review.comment,
            created_at: review.created_at,
        }
    }
}

/// Body of `POST /api/reviews` and `PUT /api/reviews/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ReviewForm {
    pub movie: DbId,
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub rating: i16,
    #[serde(default)]
    pub comment: String,
}

/// Body of `PATCH /api/reviews/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct ReviewPatch {
    pub movie: Option<DbId>,
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub rating: Option<i16>,
    pub comment: Option<String>,
}

impl ReviewPatch {
    pub fn merge(self, review: &Review) -> ReviewForm {
        ReviewForm {
            movie: self.movie.unwrap_or(review.movie_id),
            rating: self.rating.unwrap_or(review.rating),
            comment: self.comment.unwrap_or_else(|| review.comment.clone()),
        }
    }
}

/// Query parameters for `GET /api/reviews`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ReviewListParams {
    pub movie: Option<DbId>,
}
