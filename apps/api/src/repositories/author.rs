//! Author repository for centralized database operations

use sqlx::PgPool;

use super::utils::AUTHOR_COLUMNS;
use crate::models::{Author, BookAuthor};

/// Repository for author database operations
#[derive(Clone)]
pub struct AuthorRepository {
    pool: PgPool,
}

impl AuthorRepository {
    /// Create a new AuthorRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an author by their unique ID
    pub async fn find_by_id(&self, author_id: i64) -> Result<Option<Author>, sqlx::Error> {
        let sql = format!("SELECT {} FROM authors WHERE id = $1", AUTHOR_COLUMNS);
        sqlx::query_as::<_, Author>(&sql)
            .bind(author_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Find all authors with pagination
    pub async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Author>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM authors ORDER BY name ASC, id ASC LIMIT $1 OFFSET $2",
            AUTHOR_COLUMNS
        );
        sqlx::query_as::<_, Author>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    /// Find the authors of every book in `book_ids` with a single query
    ///
    /// Each row carries the book it was joined through, so the caller can
    /// partition the result per book.
    pub async fn find_by_book_ids(&self, book_ids: &[i64]) -> Result<Vec<BookAuthor>, sqlx::Error> {
        let sql = format!(
            r#"SELECT book_authors.book_id, {}
            FROM book_authors
            JOIN authors ON authors.id = book_authors.author_id
            WHERE book_authors.book_id = ANY($1)
            ORDER BY book_authors.book_id, authors.name ASC"#,
            AUTHOR_COLUMNS
        );
        sqlx::query_as::<_, BookAuthor>(&sql)
            .bind(book_ids)
            .fetch_all(&self.pool)
            .await
    }
}
