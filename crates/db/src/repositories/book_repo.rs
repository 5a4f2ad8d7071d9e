//! Repository for the `books` table and its `book_genres` links.

use pantry_core::types::DbId;
use sqlx::PgPool;

use crate::models::book::{Book, BookDetail, BookFilter, BookInput, BookRow};

use super::links::{self, BOOK_GENRES};

/// Column list for `books` queries.
const COLUMNS: &str =
    "id, title, author_id, publisher_id, publication_year, isbn, created_at, updated_at";

/// Book columns joined with author and publisher names.
const ROW_SELECT: &str = "\
    SELECT b.id, b.title, b.author_id, b.publisher_id, b.publication_year, b.isbn, \
           b.created_at, b.updated_at, \
           a.first_name AS author_first_name, a.last_name AS author_last_name, \
           p.name AS publisher_name \
    FROM books b \
    JOIN authors a ON a.id = b.author_id \
    LEFT JOIN publishers p ON p.id = b.publisher_id";

/// Provides CRUD operations for books.
pub struct BookRepo;

impl BookRepo {
    /// Insert a book and its genre links in one transaction.
    pub async fn create(pool: &PgPool, input: &BookInput) -> Result<Book, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO books (title, author_id, publisher_id, publication_year, isbn)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING {COLUMNS}"
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(&input.title)
            .bind(input.author_id)
            .bind(input.publisher_id)
            .bind(input.publication_year)
            .bind(&input.isbn)
            .fetch_one(&mut *tx)
            .await?;

        links::replace_links(&mut tx, &BOOK_GENRES, book.id, &input.genre_ids).await?;

        tx.commit().await?;
        Ok(book)
    }

    /// Replace a book's fields and genres. Returns `None` if it does not exist.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &BookInput,
    ) -> Result<Option<Book>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "UPDATE books SET
                title = $2, author_id = $3, publisher_id = $4,
                publication_year = $5, isbn = $6
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        let book = sqlx::query_as::<_, Book>(&query)
            .bind(id)
            .bind(&input.title)
            .bind(input.author_id)
            .bind(input.publisher_id)
            .bind(input.publication_year)
            .bind(&input.isbn)
            .fetch_optional(&mut *tx)
            .await?;

        if let Some(ref book) = book {
            links::replace_links(&mut tx, &BOOK_GENRES, book.id, &input.genre_ids).await?;
        }

        tx.commit().await?;
        Ok(book)
    }

    /// A book with author name, publisher name and genres.
    pub async fn find_detail(pool: &PgPool, id: DbId) -> Result<Option<BookDetail>, sqlx::Error> {
        let query = format!("{ROW_SELECT} WHERE b.id = $1");
        let row = sqlx::query_as::<_, BookRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        match row {
            Some(row) => Ok(Self::with_genres(pool, vec![row]).await?.pop()),
            None => Ok(None),
        }
    }

    /// List books ordered by title. Every present filter narrows the set.
    pub async fn list(pool: &PgPool, filter: &BookFilter) -> Result<Vec<BookDetail>, sqlx::Error> {
        let query = format!(
            "{ROW_SELECT}
             WHERE ($1::text IS NULL OR b.title ILIKE $1 OR a.last_name ILIKE $1 OR b.isbn ILIKE $1)
               AND ($2::int IS NULL OR b.publication_year = $2)
               AND ($3::bigint IS NULL OR EXISTS (
                    SELECT 1 FROM book_genres bg WHERE bg.book_id = b.id AND bg.genre_id = $3))
               AND ($4::bigint IS NULL OR b.author_id = $4)
             ORDER BY b.title, b.id"
        );
        let rows = sqlx::query_as::<_, BookRow>(&query)
            .bind(filter.pattern.as_deref())
            .bind(filter.publication_year)
            .bind(filter.genre_id)
            .bind(filter.author_id)
            .fetch_all(pool)
            .await?;
        Self::with_genres(pool, rows).await
    }

    /// Whether another book already uses `isbn`.
    pub async fn isbn_taken(
        pool: &PgPool,
        isbn: &str,
        exclude_id: Option<DbId>,
    ) -> Result<bool, sqlx::Error> {
        sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS (
                SELECT 1 FROM books
                WHERE isbn = $1 AND ($2::bigint IS NULL OR id <> $2)
             )",
        )
        .bind(isbn)
        .bind(exclude_id)
        .fetch_one(pool)
        .await
    }

    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    // -----------------------------------------------------------------------
    // Internal helpers
    // -----------------------------------------------------------------------

    async fn with_genres(
        pool: &PgPool,
        rows: Vec<BookRow>,
    ) -> Result<Vec<BookDetail>, sqlx::Error> {
        let ids: Vec<DbId> = rows.iter().map(|r| r.book.id).collect();
        let mut genres = links::load_links(pool, &BOOK_GENRES, &ids).await?;
        Ok(rows
            .into_iter()
            .map(|row| {
                let book_genres = genres.remove(&row.book.id).unwrap_or_default();
                BookDetail::new(row, book_genres)
            })
            .collect())
    }
}
