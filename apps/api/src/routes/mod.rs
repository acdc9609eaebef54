//! HTTP route handlers for the Bookstore API
//!
//! This module contains all endpoint handlers including:
//! - GraphQL execution and playground
//! - Health check and status endpoints

pub mod graphql;
pub mod health;

pub use graphql::{graphql_router, GraphQLState};
pub use health::{health_router, HealthState};

use axum::http::Uri;

use crate::error::ApiError;

/// Welcome message for `GET /`
pub async fn root() -> &'static str {
    "Welcome to Bookstore - GraphQL API"
}

/// Fallback for unknown routes
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::not_found("route", uri.path())
}
