//! Repository for the `movies` table and its genre links.

use pantry_core::types::DbId;
use sqlx::PgPool;

use crate::models::movie::{Movie, MovieForm, MovieResponse};

use super::links::{self, MOVIE_GENRES};
use super::{MovieGenreRepo, ReviewRepo};

const COLUMNS: &str = "id, title, description, poster, release_date, created_at, updated_at";

pub struct MovieRepo;

impl MovieRepo {
    /// Insert a movie, resolving its genres by name.
    pub async fn create(pool: &PgPool, input: &MovieForm) -> Result<Movie, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO movies (title, description, poster, release_date)
             VALUES ($1, $2, $3, $4)
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.poster)
            .bind(input.release_date)
            .fetch_one(&mut *tx)
            .await?;

        Self::set_genres_inner(&mut tx, movie.id, input).await?;

        tx.commit().await?;
        Ok(movie)
    }

    /// Replace every field and the genre set. Returns `None` if the movie
    /// does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &MovieForm,
    ) -> Result<Option<Movie>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE movies SET title = $2, description = $3, poster = $4, release_date = $5
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let movie = sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(&input.description)
            .bind(&input.poster)
            .bind(input.release_date)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(ref movie) = movie {
            Self::set_genres_inner(&mut tx, movie.id, input).await?;
        }

        tx.commit().await?;
        Ok(movie)
    }

    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies WHERE id = $1");
        sqlx::query_as::<_, Movie>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    pub async fn list(pool: &PgPool) -> Result<Vec<Movie>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM movies ORDER BY id");
        sqlx::query_as::<_, Movie>(&query).fetch_all(pool).await
    }

    pub async fn exists(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM movies WHERE id = $1)")
            .bind(id)
            .fetch_one(pool)
            .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM movies WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Attach genres and nested reviews to each movie.
    pub async fn responses(
        pool: &PgPool,
        movies: Vec<Movie>,
    ) -> Result<Vec<MovieResponse>, sqlx::Error> {
        let ids: Vec<DbId> = movies.iter().map(|m| m.id).collect();
        let mut genres = links::load_links(pool, &MOVIE_GENRES, &ids).await?;
        let mut reviews = ReviewRepo::for_movies(pool, &ids).await?;

        Ok(movies
            .into_iter()
            .map(|movie| {
                let id = movie.id;
                MovieResponse::new(
                    movie,
                    genres.remove(&id).unwrap_or_default(),
                    reviews.remove(&id).unwrap_or_default(),
                )
            })
            .collect())
    }

    /// A single movie with genres and reviews.
    pub async fn response(pool: &PgPool, movie: Movie) -> Result<MovieResponse, sqlx::Error> {
        let id = movie.id;
        let mut genres = links::load_links(pool, &MOVIE_GENRES, &[id]).await?;
        let mut reviews = ReviewRepo::for_movies(pool, &[id]).await?;
        Ok(MovieResponse::new(
            movie,
            genres.remove(&id).unwrap_or_default(),
            reviews.remove(&id).unwrap_or_default(),
        ))
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn set_genres_inner(
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        movie_id: DbId,
        input: &MovieForm,
    ) -> Result<(), sqlx::Error> {
        let mut genre_ids = Vec::with_capacity(input.genres.len());
        for genre in &input.genres {
            genre_ids.push(MovieGenreRepo::create_or_get_inner(tx, genre.name.trim()).await?);
        }
        links::replace_links(tx, &MOVIE_GENRES, movie_id, &genre_ids).await
    }
}
