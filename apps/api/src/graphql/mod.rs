//! GraphQL schema and resolvers for Bookstore
//!
//! This module contains the async-graphql schema including:
//! - Query resolvers for authors and books
//! - Type definitions with batched relationship resolvers
//! - Request-scoped loaders backing those relationships

pub mod loaders;
pub mod pagination;
pub mod query;
pub mod schema;
pub mod types;

pub use loaders::RequestLoaders;
pub use schema::{build_schema, BookstoreSchema, SchemaBuilder};
