//! Book GraphQL type

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};

use crate::graphql::loaders::{request_loaders, to_graphql_error};
use crate::graphql::pagination::paginate;
use crate::models::Book as DbBook;

use super::author::Author;

/// Book information exposed via GraphQL
pub struct Book {
    inner: DbBook,
}

impl Book {
    /// Create a new GraphQL Book from a database Book
    pub fn new(book: DbBook) -> Self {
        Self { inner: book }
    }
}

impl From<DbBook> for Book {
    fn from(book: DbBook) -> Self {
        Self::new(book)
    }
}

#[Object]
impl Book {
    /// Unique book identifier
    async fn id(&self) -> i64 {
        self.inner.id
    }

    /// Book title
    async fn title(&self) -> &str {
        &self.inner.title
    }

    /// Creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    /// Authors of this book (batched per window)
    async fn authors(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 50)] limit: i32,
        #[graphql(default = 0)] offset: i32,
    ) -> Result<Vec<Author>> {
        let loaders = request_loaders(ctx)?;
        let authors = loaders
            .authors_by_book
            .load(self.inner.id)
            .await
            .map_err(to_graphql_error)?;

        Ok(paginate(authors, limit, offset)
            .into_iter()
            .map(Author::from)
            .collect())
    }
}
