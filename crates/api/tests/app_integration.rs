//! Router-level tests that run without a live database.
//!
//! The pool connects lazily, so anything short of a query works: health and
//! liveness, the auth gate, global middleware, and the error envelope.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use competiscore_api::{app::create_app, config::Config};
use tower::util::ServiceExt;

fn test_app(overrides: &[(&str, &str)]) -> Router {
    let config = Config::load_for_test(overrides).expect("test config");
    let pool = persistence::db::create_lazy_pool(&config.database_config()).expect("lazy pool");
    create_app(config, pool).expect("app")
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json body")
}

#[tokio::test]
async fn health_check_reports_ok() {
    let app = test_app(&[]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "competiscore-api");
}

#[tokio::test]
async fn liveness_answers_without_database() {
    let app = test_app(&[]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health/live")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn missing_token_is_unauthorized() {
    let app = test_app(&[]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/leagues")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "unauthorized");
    assert!(json["message"].is_string());
}

#[tokio::test]
async fn malformed_bearer_token_is_unauthorized() {
    let app = test_app(&[]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/leagues")
                .header("Authorization", "Bearer not-a-real-token")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(response).await;
    assert_eq!(json["error"], "unauthorized");
}

#[tokio::test]
async fn non_bearer_authorization_is_unauthorized() {
    let app = test_app(&[]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/leagues")
                .header("Authorization", "Basic dXNlcjpwYXNz")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn unknown_route_is_not_found() {
    let app = test_app(&[]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/v1/does-not-exist")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_security_headers_and_request_id() {
    let app = test_app(&[]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let headers = response.headers();
    assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
    assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
    assert!(headers.contains_key("x-request-id"));
}

#[tokio::test]
async fn incoming_request_id_is_echoed() {
    let app = test_app(&[]);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .header("X-Request-ID", "probe-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers().get("x-request-id").unwrap(), "probe-42");
}
