//! API integration tests.
//!
//! These exercise the router, auth, and error mapping without touching the
//! external tool: every request here fails validation before any subprocess
//! would be spawned.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::ServiceExt;

use ytscribe_api::{create_router, ApiConfig, AppState};

fn test_router(api_token: Option<&str>) -> axum::Router {
    let config = ApiConfig {
        api_token: api_token.map(String::from),
        ..ApiConfig::default()
    };
    create_router(AppState::new(config))
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let app = test_router(None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn transcript_rejects_unsupported_host() {
    let app = test_router(None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/transcript?url=https://example.com/watch?v=dQw4w9WgXcQ")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["code"], "INVALID_URL");
}

#[tokio::test]
async fn transcript_requires_url_parameter() {
    let app = test_router(None);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/transcript")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn missing_bearer_token_is_unauthorized() {
    let app = test_router(Some("secret"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/transcript?url=https://example.com/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let body = body_json(response).await;
    assert_eq!(body["code"], "UNAUTHORIZED");
}

#[tokio::test]
async fn wrong_bearer_token_is_unauthorized() {
    let app = test_router(Some("secret"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/transcript?url=https://example.com/")
                .header("Authorization", "Bearer not-the-secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn valid_bearer_token_reaches_the_handler() {
    let app = test_router(Some("secret"));

    // Passes auth, then fails URL validation inside the handler.
    let response = app
        .oneshot(
            Request::builder()
                .uri("/transcript?url=https://example.com/")
                .header("Authorization", "Bearer secret")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["code"], "INVALID_URL");
}

#[tokio::test]
async fn health_endpoint_is_open_even_with_token_configured() {
    let app = test_router(Some("secret"));

    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn cors_preflight_succeeds() {
    let app = test_router(None);

    let response = app
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/transcript")
                .header("Origin", "http://localhost:3000")
                .header("Access-Control-Request-Method", "GET")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status() == StatusCode::OK || response.status() == StatusCode::NO_CONTENT);
}
