#![allow(dead_code)]

//! Test infrastructure for pr-server API tests

use pr_config::{CorsConfig, TenantConfig};
use pr_core::{PushMessage, PushTarget};
use pr_push::{ProviderError, ProviderResult, PushProvider, TokenOutcome, TopicReport};
use pr_server::{API_PREFIX, AppState, build_router};
use pr_store::JsonStore;

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use http_body_util::BodyExt;
use tempfile::TempDir;
use tower::ServiceExt;

pub const TEST_API_KEY: &str = "testkey";
pub const TEST_API_SECRET: &str = "testsecret";

/// Provider double that records sends and rejects configured tokens
#[derive(Default)]
pub struct RecordingProvider {
    pub failing_tokens: Vec<String>,
    pub unavailable: bool,
    pub sent: Mutex<Vec<(PushTarget, PushMessage)>>,
    pub topic_calls: Mutex<Vec<(String, Vec<String>, String)>>,
}

impl RecordingProvider {
    pub fn failing(tokens: &[&str]) -> Self {
        Self {
            failing_tokens: tokens.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    pub fn unavailable() -> Self {
        Self {
            unavailable: true,
            ..Default::default()
        }
    }

    fn check(&self) -> ProviderResult<()> {
        if self.unavailable {
            return Err(ProviderError::api(503, "UNAVAILABLE: FCM is down"));
        }
        Ok(())
    }
}

#[async_trait]
impl PushProvider for RecordingProvider {
    async fn send(&self, target: &PushTarget, message: &PushMessage) -> ProviderResult<String> {
        self.check()?;
        self.sent
            .lock()
            .unwrap()
            .push((target.clone(), message.clone()));
        Ok("projects/test/messages/1".to_string())
    }

    async fn send_multicast(
        &self,
        tokens: &[String],
        message: &PushMessage,
    ) -> ProviderResult<Vec<TokenOutcome>> {
        self.check()?;
        let mut outcomes = Vec::new();
        for token in tokens {
            self.sent
                .lock()
                .unwrap()
                .push((PushTarget::Token(token.clone()), message.clone()));
            outcomes.push(if self.failing_tokens.contains(token) {
                TokenOutcome::failed(token.as_str(), "NOT_FOUND: UNREGISTERED")
            } else {
                TokenOutcome::delivered(token.as_str())
            });
        }
        Ok(outcomes)
    }

    async fn subscribe_topic(&self, tokens: &[String], topic: &str) -> ProviderResult<TopicReport> {
        self.check()?;
        self.topic_calls.lock().unwrap().push((
            "subscribe".to_string(),
            tokens.to_vec(),
            topic.to_string(),
        ));
        Ok(TopicReport {
            success_count: tokens.len(),
            failure_count: 0,
        })
    }

    async fn unsubscribe_topic(
        &self,
        tokens: &[String],
        topic: &str,
    ) -> ProviderResult<TopicReport> {
        self.check()?;
        self.topic_calls.lock().unwrap().push((
            "unsubscribe".to_string(),
            tokens.to_vec(),
            topic.to_string(),
        ));
        Ok(TopicReport {
            success_count: tokens.len(),
            failure_count: 0,
        })
    }
}

pub struct TestApp {
    pub temp: TempDir,
    pub store: JsonStore,
    pub state: AppState,
    pub provider: Arc<RecordingProvider>,
}

impl TestApp {
    pub fn router(&self) -> Router {
        build_router(self.state.clone(), &CorsConfig::default())
    }
}

/// App over an empty temp data directory with test credentials seeded on disk
pub fn create_test_app(provider: RecordingProvider) -> TestApp {
    create_test_app_with(provider, |_| {}, BTreeMap::new())
}

/// Like `create_test_app`, letting the caller write documents before loading
pub fn create_test_app_with<F>(
    provider: RecordingProvider,
    prepare: F,
    tenants: BTreeMap<String, TenantConfig>,
) -> TestApp
where
    F: FnOnce(&JsonStore),
{
    let temp = TempDir::new().unwrap();
    let store = JsonStore::open(temp.path().join("data")).unwrap();

    let mut credentials = BTreeMap::new();
    credentials.insert(TEST_API_KEY.to_string(), TEST_API_SECRET.to_string());
    store
        .save(pr_store::Document::Credentials, &credentials)
        .unwrap();
    prepare(&store);

    let provider = Arc::new(provider);
    let state = AppState::load(&store, provider.clone(), true, tenants).unwrap();

    TestApp {
        temp,
        store,
        state,
        provider,
    }
}

pub fn api_path(method: &str) -> String {
    format!("{API_PREFIX}{method}")
}

pub fn basic_auth(key: &str, secret: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{key}:{secret}")))
}

/// Authenticated JSON POST to an API method
pub fn post_json(method: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(api_path(method))
        .header("content-type", "application/json")
        .header("authorization", basic_auth(TEST_API_KEY, TEST_API_SECRET))
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Authenticated form POST to an API method
pub fn post_form(method: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(api_path(method))
        .header("content-type", "application/x-www-form-urlencoded")
        .header("authorization", basic_auth(TEST_API_KEY, TEST_API_SECRET))
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Send a request and decode the JSON response body
pub async fn call(app: Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
    (status, json)
}

pub fn user_body(user_id: &str, extra: serde_json::Value) -> serde_json::Value {
    let mut body = serde_json::json!({
        "project_name": "proj",
        "site_name": "site",
        "user_id": user_id,
    });
    if let (Some(body), Some(extra)) = (body.as_object_mut(), extra.as_object()) {
        for (key, value) in extra {
            body.insert(key.clone(), value.clone());
        }
    }
    body
}
