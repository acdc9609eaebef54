//! Authors-by-Book batch loader

use bookstore_loader::{ok_map, BatchFn, BatchResult};
use sqlx::PgPool;
use std::sync::Arc;

use super::{partition_by_key, LoaderError};
use crate::models::Author;
use crate::repositories::AuthorRepository;

/// Batch loader for `Book.authors`
///
/// One query per window instead of one per book.
#[derive(Clone)]
pub struct AuthorsByBookLoader {
    repo: AuthorRepository,
}

impl AuthorsByBookLoader {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repo: AuthorRepository::new(pool),
        }
    }
}

impl BatchFn<i64> for AuthorsByBookLoader {
    type Value = Vec<Author>;
    type Error = LoaderError;

    async fn load(
        &self,
        keys: &[i64],
    ) -> Result<BatchResult<i64, Self::Value, Self::Error>, Self::Error> {
        let rows = self.repo.find_by_book_ids(keys).await.map_err(Arc::new)?;

        tracing::debug!(books = keys.len(), rows = rows.len(), "Loaded authors by book");

        Ok(ok_map(partition_by_key(
            keys,
            rows.into_iter().map(|row| (row.book_id, row.author)),
        )))
    }
}
