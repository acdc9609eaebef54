//! Books-by-Author batch loader
//!
//! Answers a window of author ids with one query over `book_authors`,
//! returning the books written by each author.

use bookstore_loader::{ok_map, BatchFn, BatchResult};
use sqlx::PgPool;
use std::sync::Arc;

use super::{partition_by_key, LoaderError};
use crate::models::Book;
use crate::repositories::BookRepository;

/// Batch loader for `Author.books`
#[derive(Clone)]
pub struct BooksByAuthorLoader {
    repo: BookRepository,
}

impl BooksByAuthorLoader {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: BookRepository::new(pool),
        }
    }
}

impl BatchFn<i64> for BooksByAuthorLoader {
    type Value = Vec<Book>;
    type Error = LoaderError;

    async fn load(
        &self,
        keys: &[i64],
    ) -> Result<BatchResult<i64, Self::Value, Self::Error>, Self::Error> {
        let rows = self
            .repo
            .find_by_author_ids(keys)
            .await
            .map_err(Arc::new)?;

        tracing::debug!(authors = keys.len(), rows = rows.len(), "Loaded books by author");

        let grouped = partition_by_key(keys, rows.into_iter().map(|row| (row.author_id, row.book)));
        Ok(ok_map(grouped))
    }
}
