use crate::{
    AppState, add_token, get_config, get_credential, health, remove_token, send_to_topic,
    send_to_user, subscribe_topic, unsubscribe_topic,
};

use pr_config::CorsConfig;

use axum::{
    Router,
    http::{HeaderValue, Method},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

/// Every API route hangs off this prefix
pub const API_PREFIX: &str = "/api/method/notification_relay.api.";

fn api(method: &str) -> String {
    format!("{API_PREFIX}{method}")
}

/// Build the application router with all endpoints
pub fn build_router(state: AppState, cors: &CorsConfig) -> Router {
    Router::new()
        // Credential bootstrap and public config (no auth)
        .route(&api("auth.get_credential"), post(get_credential))
        .route(&api("get_config"), get(get_config))
        // Device tokens
        .route(&api("token.add"), post(add_token))
        .route(&api("token.remove"), post(remove_token))
        // Topics
        .route(&api("topic.subscribe"), post(subscribe_topic))
        .route(&api("topic.unsubscribe"), post(unsubscribe_topic))
        // Notifications
        .route(&api("send_notification.user"), post(send_to_user))
        .route(&api("send_notification.topic"), post(send_to_topic))
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::liveness_check))
        .route("/ready", get(health::readiness_check))
        .with_state(state)
        .layer(cors_layer(cors))
}

fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any);

    if cors.allows_any() {
        return layer.allow_origin(Any);
    }

    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                log::warn!("Ignoring CORS origin {:?}: {}", origin, e);
                None
            }
        })
        .collect();

    layer.allow_origin(AllowOrigin::list(origins))
}
