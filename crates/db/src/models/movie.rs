//! Movie review API: movie model, serializer-shaped responses and write
//! payloads.

use pantry_core::types::{Date, DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::reference::NameRef;
use super::review::ReviewResponse;

// ---------------------------------------------------------------------------
// Entity structs (database rows)
// ---------------------------------------------------------------------------

/// A row from the `movies` table.
#[derive(Debug, Clone, FromRow)]
pub struct Movie {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub poster: Option<String>,
    pub release_date: Date,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Response shapes
// ---------------------------------------------------------------------------

/// A movie with its genres and read-only nested reviews.
#[derive(Debug, Clone, Serialize)]
pub struct MovieResponse {
    pub id: DbId,
    pub title: String,
    pub description: String,
    pub genres: Vec<NameRef>,
    pub poster: Option<String>,
    pub release_date: Date,
    pub reviews: Vec<ReviewResponse>,
}

impl MovieResponse {
    pub fn new(
        movie: Movie,
        genres: Vec<NameRef>,
        reviews: Vec<ReviewResponse>,
    ) -> Self {
        Self {
            id: movie.id,
            title: movie.title,
            description: movie.description,
            genres,
            poster: movie.poster,
            release_date: movie.release_date,
            reviews,
        }
    }
}

// ---------------------------------------------------------------------------
// DTOs (request payloads)
// ---------------------------------------------------------------------------

/// Nested genre in a movie write, resolved by name (created when missing).
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct GenreInput {
    #[validate(length(min = 1, max = 50, message = "Enter a name of at most 50 characters."))]
    pub name: String,
}

/// Body of `POST /api/movies` and `PUT /api/movies/{id}`.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct MovieForm {
    #[validate(length(min = 1, max = 100, message = "Enter a title of at most 100 characters."))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    #[validate(nested)]
    pub genres: Vec<GenreInput>,
    #[serde(default)]
    pub poster: Option<String>,
    pub release_date: Date,
}

/// Body of `PATCH /api/movies/{id}`. Absent fields keep their value;
/// `genres`, when present, replaces the whole set.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MoviePatch {
    #[validate(length(min = 1, max = 100, message = "Enter a title of at most 100 characters."))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(nested)]
    pub genres: Option<Vec<GenreInput>>,
    pub poster: Option<String>,
    pub release_date: Option<Date>,
}

impl MoviePatch {
    /// Fill absent fields from the stored movie, producing a full form.
    pub fn merge(self, movie: &Movie, current_genres: &[NameRef]) -> MovieForm {
        MovieForm {
            title: self.title.unwrap_or_else(|| movie.title.clone()),
            description: self
                .description
                .unwrap_or_else(|| movie.description.clone()),
            genres: self.genres.unwrap_or_else(|| {
                current_genres
                    .iter()
                    .map(|g| GenreInput {
                        name: g.name.clone(),
                    })
                    .collect()
            }),
            poster: self.poster.or_else(|| movie.poster.clone()),
            release_date: self.release_date.unwrap_or(movie.release_date),
        }
    }
}

/// Body of `POST`/`PUT /api/genres`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(default)]
pub struct MovieGenreForm {
    #[validate(length(min = 1, max = 50, message = "Enter a name of at most 50 characters."))]
    pub name: String,
}

/// Body of `PATCH /api/genres/{id}`.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct MovieGenrePatch {
    #[validate(length(min = 1, max = 50, message = "Enter a name of at most 50 characters."))]
    pub name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};

    fn stored_movie() -> Movie {
        Movie {
            id: 7,
            title: "Alien".into(),
            description: "In space.".into(),
            poster: Some("posters/alien.jpg".into()),
            release_date: NaiveDate::from_ymd_opt(1979, 5, 25).unwrap(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn patch_keeps_absent_fields() {
        let genres = vec![NameRef {
            id: 1,
            name: "Horror".into(),
        }];
        let patch = MoviePatch {
            title: Some("Aliens".into()),
            ..Default::default()
        };

        let form = patch.merge(&stored_movie(), &genres);

        assert_eq!(form.title, "Aliens");
        assert_eq!(form.description, "In space.");
        assert_eq!(form.genres.len(), 1);
        assert_eq!(form.genres[0].name, "Horror");
        assert_eq!(form.poster.as_deref(), Some("posters/alien.jpg"));
    }

    #[test]
    fn patch_genres_replace_the_set() {
        let genres = vec![NameRef {
            id: 1,
            name: "Horror".into(),
        }];
        let patch = MoviePatch {
            genres: Some(vec![]),
            ..Default::default()
        };

        let form = patch.merge(&stored_movie(), &genres);

        assert!(form.genres.is_empty());
    }
}
