//! Health check routes.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use crate::app::AppState;

/// GET /api/health
///
/// Basic health check with service metadata.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "competiscore-api",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/health/live
///
/// Liveness probe. Answers without touching the database.
pub async fn live() -> impl IntoResponse {
    StatusCode::NO_CONTENT
}

/// GET /api/health/ready
///
/// Readiness probe. Fails until the database answers a ping.
pub async fn ready(State(state): State<AppState>) -> impl IntoResponse {
    match sqlx::query_scalar::<_, i32>("SELECT 1")
        .fetch_one(&state.pool)
        .await
    {
        Ok(_) => (StatusCode::OK, Json(json!({"status": "ready"}))).into_response(),
        Err(e) => {
            tracing::warn!("Readiness check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({"status": "unavailable"})),
            )
                .into_response()
        }
    }
}
