//! GraphQL HTTP route handlers
//!
//! - `POST /graphql` - Execute a query with a fresh set of request loaders
//! - `GET /graphql/playground` - GraphQL Playground UI

use std::sync::Arc;

use async_graphql::http::{playground_source, GraphQLPlaygroundConfig};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::State,
    response::{Html, IntoResponse},
    routing::{get, post},
    Router,
};
use bookstore_loader::{CancellationToken, LoaderConfig};
use sqlx::PgPool;
use tracing::Instrument;
use uuid::Uuid;

use crate::graphql::{BookstoreSchema, RequestLoaders};

/// Shared state for the GraphQL handlers
#[derive(Clone)]
pub struct GraphQLState {
    pub schema: BookstoreSchema,
    pub pool: PgPool,
    pub loader_config: LoaderConfig,
}

impl GraphQLState {
    pub fn new(schema: BookstoreSchema, pool: PgPool, loader_config: LoaderConfig) -> Self {
        Self {
            schema,
            pool,
            loader_config,
        }
    }
}

/// Create the GraphQL router
pub fn graphql_router(state: GraphQLState) -> Router {
    Router::new()
        .route("/", post(graphql_handler))
        .route("/playground", get(graphql_playground))
        .with_state(state)
}

/// Execute one GraphQL request
///
/// Loaders live exactly as long as this handler. If the client disconnects
/// the handler future is dropped, the drop guard cancels the request token,
/// and every outstanding load resolves as cancelled.
async fn graphql_handler(
    State(state): State<GraphQLState>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("graphql", %request_id);

    async move {
        let request_token = CancellationToken::new();
        let _cancel_on_drop = request_token.clone().drop_guard();

        let loaders = Arc::new(RequestLoaders::new(
            state.pool.clone(),
            &state.loader_config,
            &request_token,
        ));

        let request = req.into_inner().data(Arc::clone(&loaders));
        let response = state.schema.execute(request).await;

        if response.is_err() {
            tracing::debug!(errors = response.errors.len(), "GraphQL request completed with errors");
        }
        loaders.log_stats();

        response.into()
    }
    .instrument(span)
    .await
}

/// GraphQL Playground handler for development
async fn graphql_playground() -> impl IntoResponse {
    Html(playground_source(GraphQLPlaygroundConfig::new("/graphql")))
}
