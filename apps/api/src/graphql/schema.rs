//! GraphQL schema builder for Bookstore
//!
//! The schema holds the repositories used by top-level queries. Loaders are
//! not part of the schema; they are attached to each request instead.

use async_graphql::{EmptyMutation, EmptySubscription, Schema};
use bookstore_loader::LoaderConfig;
use sqlx::PgPool;

use crate::repositories::{AuthorRepository, BookRepository};

use super::query::Query;

/// Maximum query nesting depth accepted by the schema
pub const MAX_QUERY_DEPTH: usize = 16;

/// The Bookstore GraphQL schema type
pub type BookstoreSchema = Schema<Query, EmptyMutation, EmptySubscription>;

/// Builder for constructing the GraphQL schema with required services
pub struct SchemaBuilder {
    pool: Option<PgPool>,
    loader_config: LoaderConfig,
}

impl SchemaBuilder {
    /// Create a new schema builder
    pub fn new() -> Self {
        Self {
            pool: None,
            loader_config: LoaderConfig::default(),
        }
    }

    /// Set the database pool
    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    /// Set the configuration used for each request's loaders
    pub fn loader_config(mut self, loader_config: LoaderConfig) -> Self {
        self.loader_config = loader_config;
        self
    }

    /// Build the schema with all configured services
    ///
    /// # Panics
    /// Panics if the database pool is not configured
    pub fn build(self) -> BookstoreSchema {
        let pool = self.pool.expect("database pool is required");

        Schema::build(Query::default(), EmptyMutation, EmptySubscription)
            .data(AuthorRepository::new(pool.clone()))
            .data(BookRepository::new(pool.clone()))
            .data(self.loader_config)
            .data(pool)
            .limit_depth(MAX_QUERY_DEPTH)
            .finish()
    }
}

impl Default for SchemaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a new GraphQL schema with the provided services
pub fn build_schema(pool: PgPool, loader_config: LoaderConfig) -> BookstoreSchema {
    SchemaBuilder::new()
        .pool(pool)
        .loader_config(loader_config)
        .build()
}
