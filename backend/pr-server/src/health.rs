use crate::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - component status
pub async fn health_check(State(state): State<AppState>) -> Response {
    let tenants = state.registry.tenant_count().await;

    let health = json!({
        "status": if state.provider_ready { "healthy" } else { "degraded" },
        "version": env!("CARGO_PKG_VERSION"),
        "components": {
            "push_provider": if state.provider_ready { "operational" } else { "unavailable" },
            "credentials": state.credentials.len().await,
            "registered_tenants": tenants,
        },
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - liveness probe (is the process alive?)
pub async fn liveness_check() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - readiness probe; not ready while the push provider is down
pub async fn readiness_check(State(state): State<AppState>) -> Response {
    if state.provider_ready {
        (StatusCode::OK, "Ready").into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "Push provider unavailable").into_response()
    }
}
