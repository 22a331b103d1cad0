use crate::{
    DispatchError, Dispatcher, FcmProvider, ProviderError, PushProvider, ServiceAccount,
    UserNotification,
};

use pr_config::FcmConfig;
use pr_core::{DecorationEngine, PushMessage, PushTarget, TenantKey};
use pr_store::{DeviceRegistry, Document, IconStore, JsonStore, RegistryDocument};

use std::collections::BTreeMap;
use std::sync::Arc;

use googletest::assert_that;
use googletest::prelude::{eq, none, some};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{body_partial_json, body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TEST_PRIVATE_KEY: &str = include_str!("fixtures/test_service_account_key.pem");

fn service_account(server: &MockServer) -> ServiceAccount {
    ServiceAccount::from_json(
        &json!({
            "type": "service_account",
            "project_id": "test-project",
            "private_key_id": "key-1",
            "private_key": TEST_PRIVATE_KEY,
            "client_email": "relay@test-project.iam.gserviceaccount.com",
            "token_uri": format!("{}/token", server.uri()),
        })
        .to_string(),
    )
    .unwrap()
}

fn fcm_config(server: &MockServer) -> FcmConfig {
    FcmConfig {
        fcm_base_url: server.uri(),
        iid_base_url: server.uri(),
        timeout_secs: 5,
        ..FcmConfig::default()
    }
}

async fn mount_token_endpoint(server: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "ya29.test",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(expected_calls)
        .mount(server)
        .await;
}

fn message() -> PushMessage {
    PushMessage {
        title: "Hi".to_string(),
        body: "There".to_string(),
        ..Default::default()
    }
}

#[tokio::test]
async fn given_good_and_unregistered_tokens_when_multicast_then_per_token_outcomes() {
    // Given
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/v1/projects/test-project/messages:send"))
        .and(header("authorization", "Bearer ya29.test"))
        .and(body_partial_json(json!({ "message": { "token": "good" } })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "name": "projects/test-project/messages/1" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/projects/test-project/messages:send"))
        .and(body_partial_json(json!({ "message": { "token": "stale" } })))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {
                "code": 404,
                "message": "Requested entity was not found.",
                "status": "NOT_FOUND"
            }
        })))
        .mount(&server)
        .await;
    let provider = FcmProvider::new(service_account(&server), &fcm_config(&server)).unwrap();

    // When
    let outcomes = provider
        .send_multicast(&["good".to_string(), "stale".to_string()], &message())
        .await
        .unwrap();

    // Then
    assert_that!(outcomes.len(), eq(2));
    assert_that!(outcomes[0].token, eq("good"));
    assert_that!(outcomes[0].error, none());
    assert_that!(outcomes[1].token, eq("stale"));
    assert_that!(
        outcomes[1].error,
        some(eq("404: NOT_FOUND: Requested entity was not found."))
    );
}

async fn mount_send_failure(server: &MockServer, status: u16, fcm_status: &str, text: &str) {
    Mock::given(method("POST"))
        .and(path("/v1/projects/test-project/messages:send"))
        .respond_with(ResponseTemplate::new(status).set_body_json(json!({
            "error": { "code": status, "message": text, "status": fcm_status }
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn given_fcm_unavailable_when_multicast_then_whole_call_fails() {
    // Given
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;
    mount_send_failure(&server, 503, "UNAVAILABLE", "The service is currently unavailable.").await;
    let provider = FcmProvider::new(service_account(&server), &fcm_config(&server)).unwrap();

    // When
    let result = provider
        .send_multicast(&["A".to_string(), "B".to_string()], &message())
        .await;

    // Then
    let Err(error) = result else {
        panic!("expected an error");
    };
    assert!(matches!(error, ProviderError::Api { status: 503, .. }));
    assert_that!(
        error.provider_message(),
        eq("503: UNAVAILABLE: The service is currently unavailable.")
    );
}

#[tokio::test]
async fn given_quota_exceeded_for_one_token_when_multicast_then_whole_call_fails() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/v1/projects/test-project/messages:send"))
        .and(body_partial_json(json!({ "message": { "token": "good" } })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "name": "projects/test-project/messages/1" })),
        )
        .mount(&server)
        .await;
    mount_send_failure(&server, 429, "RESOURCE_EXHAUSTED", "Quota exceeded.").await;
    let provider = FcmProvider::new(service_account(&server), &fcm_config(&server)).unwrap();

    let result = provider
        .send_multicast(&["good".to_string(), "busy".to_string()], &message())
        .await;

    assert!(matches!(result, Err(ProviderError::Api { status: 429, .. })));
}

#[tokio::test]
async fn given_malformed_registration_token_when_multicast_then_token_reported_failed() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;
    mount_send_failure(
        &server,
        400,
        "INVALID_ARGUMENT",
        "The registration token is not a valid FCM registration token",
    )
    .await;
    let provider = FcmProvider::new(service_account(&server), &fcm_config(&server)).unwrap();

    let outcomes = provider
        .send_multicast(&["garbage".to_string()], &message())
        .await
        .unwrap();

    assert_that!(outcomes.len(), eq(1));
    assert!(!outcomes[0].is_success());
}

#[tokio::test]
async fn given_fcm_outage_when_sending_to_user_then_error_and_tokens_kept() {
    // Given
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;
    mount_send_failure(&server, 503, "UNAVAILABLE", "The service is currently unavailable.").await;
    let provider = FcmProvider::new(service_account(&server), &fcm_config(&server)).unwrap();

    let temp = TempDir::new().unwrap();
    let store = JsonStore::open(temp.path()).unwrap();
    let registry = DeviceRegistry::load(store.clone()).unwrap();
    let tenant = TenantKey::from_raw("proj_site");
    for token in ["A", "B", "C"] {
        registry.add_token(&tenant, "u1", token).await.unwrap();
    }
    let dispatcher = Dispatcher::new(
        registry.clone(),
        Arc::new(DecorationEngine::default()),
        Arc::new(IconStore::new(BTreeMap::new(), temp.path().to_path_buf())),
        Arc::new(provider),
    );

    // When
    let result = dispatcher
        .send_to_user(
            &tenant,
            "u1",
            UserNotification {
                title: "Hi".to_string(),
                body: String::new(),
                icon: None,
                data: None,
            },
        )
        .await;

    // Then
    assert!(matches!(result, Err(DispatchError::Provider { .. })));
    let expected = vec!["A".to_string(), "B".to_string(), "C".to_string()];
    assert_that!(registry.lookup(&tenant, "u1").await, some(eq(&expected)));
    let on_disk: RegistryDocument = store.load(Document::DeviceTokens).unwrap();
    assert_that!(on_disk[&tenant]["u1"], eq(&expected));
}

#[tokio::test]
async fn given_two_sends_when_token_cached_then_token_endpoint_hit_once() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/v1/projects/test-project/messages:send"))
        .and(body_partial_json(json!({ "message": { "topic": "news" } })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "name": "projects/test-project/messages/7" })),
        )
        .expect(2)
        .mount(&server)
        .await;
    let provider = FcmProvider::new(service_account(&server), &fcm_config(&server)).unwrap();

    let first = provider
        .send(&PushTarget::Topic("news".to_string()), &message())
        .await
        .unwrap();
    provider
        .send(&PushTarget::Topic("/topics/news".to_string()), &message())
        .await
        .unwrap();

    assert_that!(first, eq("projects/test-project/messages/7"));
}

#[tokio::test]
async fn given_rejected_grant_when_sending_then_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/token"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": "invalid_grant"
        })))
        .mount(&server)
        .await;
    let provider = FcmProvider::new(service_account(&server), &fcm_config(&server)).unwrap();

    let result = provider
        .send_multicast(&["good".to_string()], &message())
        .await;

    assert!(matches!(result, Err(ProviderError::Auth { .. })));
}

#[tokio::test]
async fn given_batch_add_with_partial_failure_when_subscribing_then_counts_reported() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/iid/v1:batchAdd"))
        .and(header("access_token_auth", "true"))
        .and(body_partial_json(json!({
            "to": "/topics/news",
            "registration_tokens": ["A", "B"]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [{}, { "error": "NOT_FOUND" }]
        })))
        .expect(1)
        .mount(&server)
        .await;
    let provider = FcmProvider::new(service_account(&server), &fcm_config(&server)).unwrap();

    let report = provider
        .subscribe_topic(&["A".to_string(), "B".to_string()], "news")
        .await
        .unwrap();

    assert_that!(report.success_count, eq(1));
    assert_that!(report.failure_count, eq(1));
}

#[tokio::test]
async fn given_batch_remove_rejected_when_unsubscribing_then_api_error() {
    let server = MockServer::start().await;
    mount_token_endpoint(&server, 1).await;
    Mock::given(method("POST"))
        .and(path("/iid/v1:batchRemove"))
        .respond_with(ResponseTemplate::new(401).set_body_string("Unauthorized"))
        .mount(&server)
        .await;
    let provider = FcmProvider::new(service_account(&server), &fcm_config(&server)).unwrap();

    let result = provider.unsubscribe_topic(&["A".to_string()], "news").await;

    let Err(error) = result else {
        panic!("expected an error");
    };
    assert!(matches!(error, ProviderError::Api { status: 401, .. }));
    assert_that!(error.provider_message(), eq("401: Unauthorized"));
}

#[test]
fn given_no_service_account_path_when_built_from_config_then_init_error() {
    let result = FcmProvider::from_config(&FcmConfig::default(), None);

    assert!(matches!(result, Err(ProviderError::Init { .. })));
}

#[test]
fn given_invalid_private_key_when_built_then_init_error() {
    let account = ServiceAccount::from_json(
        &json!({
            "project_id": "test-project",
            "client_email": "relay@test-project.iam.gserviceaccount.com",
            "private_key": "not a key"
        })
        .to_string(),
    )
    .unwrap();

    let result = FcmProvider::new(account, &FcmConfig::default());

    assert!(matches!(result, Err(ProviderError::Init { .. })));
}

#[test]
fn given_service_account_without_project_when_parsed_then_init_error() {
    let result = ServiceAccount::from_json(r#"{"project_id": "", "client_email": "x", "private_key": "y"}"#);

    assert!(matches!(result, Err(ProviderError::Init { .. })));
}
