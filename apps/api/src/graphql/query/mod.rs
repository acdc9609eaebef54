//! GraphQL queries for Bookstore

mod library;

pub use library::LibraryQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(LibraryQuery);
