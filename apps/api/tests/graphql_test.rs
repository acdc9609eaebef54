//! Integration tests for the GraphQL endpoint
//!
//! These run without a database: queries that reach storage must fail with
//! a generic error, never with connection details.

mod common;

use assert_matches::assert_matches;
use axum::http::StatusCode;
use common::{assert_status, body_json, body_text, get, post_graphql, test_app, UNREACHABLE_DATABASE_URL};

#[tokio::test]
async fn test_playground_is_served() {
    let response = get(test_app(), "/graphql/playground").await;

    assert_status(&response, StatusCode::OK);
    assert!(body_text(response).await.contains("/graphql"));
}

#[tokio::test]
async fn test_invalid_query_is_rejected_before_storage() {
    let response = post_graphql(test_app(), "{ publishers { id } }").await;

    assert_status(&response, StatusCode::OK);
    let json = body_json(response).await;
    let errors = json["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);
    assert!(errors[0]["message"].as_str().unwrap().contains("publishers"));
}

#[test_log::test(tokio::test)]
async fn test_storage_failure_hides_details() {
    let response = post_graphql(test_app(), "{ authors { id name books { title } } }").await;

    assert_status(&response, StatusCode::OK);
    let json = body_json(response).await;
    let errors = json["errors"].as_array().expect("errors array");
    assert_eq!(errors.len(), 1);

    let error = &errors[0];
    assert_eq!(error["message"], "An unexpected error occurred");
    assert_matches!(
        error["extensions"]["code"].as_str(),
        Some("DATABASE_UNAVAILABLE" | "DATABASE_ERROR")
    );
    assert!(!json.to_string().contains(UNREACHABLE_DATABASE_URL));
}

#[tokio::test]
async fn test_book_lookup_goes_through_book_repository() {
    let response = post_graphql(test_app(), "{ book(id: 1) { title } }").await;

    let json = body_json(response).await;
    assert_eq!(json["errors"][0]["path"][0], "book");
}
