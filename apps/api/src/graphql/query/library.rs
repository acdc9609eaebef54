//! Library queries for Bookstore GraphQL API
//!
//! Top-level lookups go straight to the repositories; only the relationship
//! fields on the returned objects are batched.

use async_graphql::{Context, Object, Result};

use crate::error::ApiError;
use crate::graphql::pagination::{clamp_limit, clamp_offset, MAX_LIMIT};
use crate::graphql::types::{Author, Book};
use crate::repositories::{AuthorRepository, BookRepository};

/// Library-related queries for browsing authors and books
#[derive(Default)]
pub struct LibraryQuery;

#[Object]
impl LibraryQuery {
    // ==================== Author Queries ====================

    /// Get an author by ID
    async fn author(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Author>> {
        let repo = ctx.data::<AuthorRepository>()?;
        let author = repo
            .find_by_id(id)
            .await
            .map_err(|e| ApiError::from(e).into_graphql())?;
        Ok(author.map(Author::from))
    }

    /// List all authors with pagination
    async fn authors(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 50)] limit: i32,
        #[graphql(default = 0)] offset: i32,
    ) -> Result<Vec<Author>> {
        let repo = ctx.data::<AuthorRepository>()?;
        let authors = repo
            .find_all(clamp_limit(limit, MAX_LIMIT), clamp_offset(offset))
            .await
            .map_err(|e| ApiError::from(e).into_graphql())?;
        Ok(authors.into_iter().map(Author::from).collect())
    }

    // ==================== Book Queries ====================

    /// Get a book by ID
    async fn book(&self, ctx: &Context<'_>, id: i64) -> Result<Option<Book>> {
        let repo = ctx.data::<BookRepository>()?;
        let book = repo
            .find_by_id(id)
            .await
            .map_err(|e| ApiError::from(e).into_graphql())?;
        Ok(book.map(Book::from))
    }

    /// List all books with pagination
    async fn books(
        &self,
        ctx: &Context<'_>,
        #[graphql(default = 50)] limit: i32,
        #[graphql(default = 0)] offset: i32,
    ) -> Result<Vec<Book>> {
        let repo = ctx.data::<BookRepository>()?;
        let books = repo
            .find_all(clamp_limit(limit, MAX_LIMIT), clamp_offset(offset))
            .await
            .map_err(|e| ApiError::from(e).into_graphql())?;
        Ok(books.into_iter().map(Book::from).collect())
    }
}
