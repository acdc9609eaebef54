//! Book repository for centralized database operations

use sqlx::PgPool;

use super::utils::BOOK_COLUMNS;
use crate::models::{AuthorBook, Book};

/// Repository for book database operations
#[derive(Clone)]
pub struct BookRepository {
    pool: PgPool,
}

impl BookRepository {
    /// Create a new BookRepository instance
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a book by its unique ID
    pub async fn find_by_id(&self, book_id: i64) -> Result<Option<Book>, sqlx::Error> {
        let sql = format!("SELECT {} FROM books WHERE id = $1", BOOK_COLUMNS);
        sqlx::query_as::<_, Book>(&sql)
            .bind(book_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Find all books with pagination
    pub async fn find_all(&self, limit: i64, offset: i64) -> Result<Vec<Book>, sqlx::Error> {
        let sql = format!(
            "SELECT {} FROM books ORDER BY title ASC, id ASC LIMIT $1 OFFSET $2",
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, Book>(&sql)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await
    }

    /// Find the books of every author in `author_ids` with a single query
    pub async fn find_by_author_ids(
        &self,
        author_ids: &[i64],
    ) -> Result<Vec<AuthorBook>, sqlx::Error> {
        let sql = format!(
            r#"SELECT book_authors.author_id, {}
            FROM book_authors
            JOIN books ON books.id = book_authors.book_id
            WHERE book_authors.author_id = ANY($1)
            ORDER BY book_authors.author_id, books.title ASC"#,
            BOOK_COLUMNS
        );
        sqlx::query_as::<_, AuthorBook>(&sql)
            .bind(author_ids)
            .fetch_all(&self.pool)
            .await
    }
}
