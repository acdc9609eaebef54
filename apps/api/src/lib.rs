//! Bookstore API library
//!
//! This module exposes the core API components for use in integration tests
//! and by the server binary.

pub mod config;
pub mod error;
pub mod graphql;
pub mod models;
pub mod repositories;
pub mod routes;

use std::time::Duration;

use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use bookstore_loader::LoaderConfig;
use sqlx::PgPool;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

// Re-export commonly used types
pub use error::{ApiError, ErrorResponse};
pub use graphql::{build_schema, BookstoreSchema, RequestLoaders};

use routes::{graphql_router, health_router, GraphQLState, HealthState};

/// Build the CORS layer based on configuration.
///
/// In production mode:
/// - If `CORS_ORIGINS` is set, only those origins are allowed
/// - If `CORS_ORIGINS` is not set, CORS requests are rejected (no origins allowed)
///
/// In development mode:
/// - If `CORS_ORIGINS` is set, those origins are used
/// - If `CORS_ORIGINS` is not set, permissive CORS is used for convenience
pub fn build_cors_layer(config: &config::Config) -> CorsLayer {
    match &config.cors_allowed_origins {
        Some(origins) if !origins.is_empty() => {
            let allowed_origins: Vec<_> = origins
                .iter()
                .filter_map(|origin| {
                    origin.parse().ok().or_else(|| {
                        tracing::warn!("Invalid CORS origin '{}', skipping", origin);
                        None
                    })
                })
                .collect();

            if allowed_origins.is_empty() {
                tracing::error!("No valid CORS origins configured, CORS requests will be rejected");
                CorsLayer::new()
            } else {
                tracing::info!(
                    "CORS configured with {} allowed origin(s): {:?}",
                    allowed_origins.len(),
                    origins
                );
                CorsLayer::new()
                    .allow_origin(allowed_origins)
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
                    .max_age(Duration::from_secs(3600))
            }
        }
        _ if config.is_production() => {
            tracing::warn!(
                "CORS_ORIGINS not configured in production mode. \
                 CORS requests will be rejected. Set CORS_ORIGINS to allow cross-origin requests."
            );
            CorsLayer::new()
        }
        _ => {
            tracing::warn!(
                "Using permissive CORS in development mode. \
                 Set CORS_ORIGINS for production-like behavior."
            );
            CorsLayer::permissive()
        }
    }
}

/// Assemble the application router
///
/// Routes:
/// - `/` welcome message
/// - `/graphql`, `/graphql/playground`
/// - `/health`, `/health/live`, `/health/ready`
pub fn build_router(pool: PgPool, loader_config: LoaderConfig) -> Router {
    let schema = build_schema(pool.clone(), loader_config);
    let graphql_state = GraphQLState::new(schema, pool.clone(), loader_config);
    let health_state = HealthState::new(pool);

    Router::new()
        .route("/", get(routes::root))
        .nest("/graphql", graphql_router(graphql_state))
        .nest("/health", health_router(health_state))
        .fallback(routes::not_found)
        .layer(TraceLayer::new_for_http())
}
