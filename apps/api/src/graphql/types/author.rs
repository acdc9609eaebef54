//! Author GraphQL type
//!
//! This module defines the GraphQL type for authors with relationship resolvers.

use async_graphql::{Context, Object, Result};
use chrono::{DateTime, Utc};

use crate::graphql::loaders::{request_loaders, to_graphql_error};
use crate::graphql::pagination::paginate;
use crate::models::Author as DbAuthor;

use super::book::Book;

/// Author information exposed via GraphQL
pub struct Author {
    inner: DbAuthor,
}

impl Author {
    /// Create a new GraphQL Author from a database Author
    pub fn new(author: DbAuthor) -> Self {
        Self { inner: author }
    }
}

impl From<DbAuthor> for Author {
    fn from(author: DbAuthor) -> Self {
        Self::new(author)
    }
}

#[Object]
impl Author {
    /// Unique author identifier
    async fn id(&self) -> i64 {
        self.inner.id
    }

    /// Author name
    async fn name(&self) -> &str {
        &self.inner.name
    }

    /// Creation timestamp
    async fn created_at(&self) -> DateTime<Utc> {
        self.inner.created_at
    }

    // Relationship resolvers

    /// Books written by this author
    ///
    /// Every `books` field resolved in the same window shares one query.
    async fn books(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 50)] limit: i32,
        #[graphql(default = 0)] offset: i32,
    ) -> Result<Vec<Book>> {
        let loaders = request_loaders(ctx)?;
        let books = loaders
            .books_by_author
            .load(self.inner.id)
            .await
            .map_err(to_graphql_error)?;

        Ok(paginate(books, limit, offset)
            .into_iter()
            .map(Book::from)
            .collect())
    }
}
