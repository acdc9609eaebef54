//! Request-scoped batch loaders for GraphQL relationship resolvers
//!
//! Relationship fields (`Author.books`, `Book.authors`) would otherwise run
//! one query per parent row. Each resolver instead asks a
//! [`LoadCoordinator`] for its parent's key; the coordinator collects the
//! keys requested while a window is open and answers them with one query.
//!
//! A fresh [`RequestLoaders`] is built for every GraphQL request and attached
//! to it with `Request::data`, so no coordinator is shared across requests.

mod authors_by_book;
mod books_by_author;

pub use authors_by_book::AuthorsByBookLoader;
pub use books_by_author::BooksByAuthorLoader;

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use async_graphql::{Context, ErrorExtensions};
use bookstore_loader::{CancellationToken, LoadCoordinator, LoadError, LoaderConfig};
use sqlx::PgPool;

use crate::error::ApiError;

/// Error type shared by the storage-backed loaders
///
/// `sqlx::Error` is not `Clone`, and one failure has to reach every caller
/// waiting on the batch.
pub type LoaderError = Arc<sqlx::Error>;

/// Group edge rows by their relation key
///
/// Every requested key gets an entry, so a parent with no related rows maps
/// to an empty collection rather than being reported as missing.
pub fn partition_by_key<K, V, I>(keys: &[K], rows: I) -> HashMap<K, Vec<V>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, V)>,
{
    let mut grouped: HashMap<K, Vec<V>> = keys.iter().map(|k| (k.clone(), Vec::new())).collect();
    for (key, row) in rows {
        grouped.entry(key).or_default().push(row);
    }
    grouped
}

/// One coordinator per relation, scoped to a single GraphQL request
pub struct RequestLoaders {
    pub books_by_author: LoadCoordinator<i64, BooksByAuthorLoader>,
    pub authors_by_book: LoadCoordinator<i64, AuthorsByBookLoader>,
}

impl RequestLoaders {
    /// Build the loaders for one request
    ///
    /// Cancelling `request_token` resolves every outstanding load with
    /// [`LoadError::Cancelled`].
    pub fn new(pool: PgPool, config: &LoaderConfig, request_token: &CancellationToken) -> Self {
        Self {
            books_by_author: LoadCoordinator::with_parent_token(
                BooksByAuthorLoader::new(pool.clone()),
                *config,
                request_token,
            ),
            authors_by_book: LoadCoordinator::with_parent_token(
                AuthorsByBookLoader::new(pool),
                *config,
                request_token,
            ),
        }
    }

    /// Log what the loaders did over the lifetime of the request
    pub fn log_stats(&self) {
        let books = self.books_by_author.stats();
        let authors = self.authors_by_book.stats();
        tracing::debug!(
            books_requests = books.requests,
            books_batches = books.batches,
            books_keys = books.keys_fetched,
            books_deduplicated = books.deduplicated,
            authors_requests = authors.requests,
            authors_batches = authors.batches,
            authors_keys = authors.keys_fetched,
            authors_deduplicated = authors.deduplicated,
            "Request loaders finished"
        );
    }
}

/// Fetch the request's loaders from the GraphQL context
pub fn request_loaders<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a RequestLoaders> {
    ctx.data::<Arc<RequestLoaders>>()
        .map(|loaders| loaders.as_ref())
        .map_err(|_| ApiError::Internal("request loaders not attached".to_string()).into_graphql())
}

/// Map a failed load to a GraphQL error with a `code` extension
///
/// Database details are logged, never returned to the client.
pub fn to_graphql_error(err: LoadError<LoaderError>) -> async_graphql::Error {
    let (code, message) = match &err {
        LoadError::Batch(source) | LoadError::Key(source) => {
            tracing::error!(error = %source, "Relation load failed");
            ("LOAD_FAILED", "Failed to load related records")
        }
        LoadError::Missing => {
            tracing::warn!("Relation loader returned no entry for a requested key");
            ("LOAD_MISSING", "Related records are unavailable")
        }
        LoadError::Cancelled => {
            tracing::debug!("Relation load cancelled");
            ("LOAD_CANCELLED", "Request was cancelled")
        }
    };
    async_graphql::Error::new(message).extend_with(|_, e| e.set("code", code))
}
