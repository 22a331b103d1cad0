use crate::ApiError;

use pr_auth::AuthError;
use pr_push::{DispatchError, ProviderError};
use pr_store::StoreError;

use std::panic::Location;

use axum::response::IntoResponse;
use error_location::ErrorLocation;
use http::StatusCode;
use http::header::WWW_AUTHENTICATE;
use http_body_util::BodyExt;

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_not_found_returns_404_with_failure_envelope() {
    let error = ApiError::not_found("No configuration for proj_site");
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
    assert_eq!(json["error"]["code"], "NOT_FOUND");
    assert_eq!(json["error"]["message"], "No configuration for proj_site");
    assert!(json["error"].get("field").is_none());
}

#[tokio::test]
async fn test_validation_error_returns_400_with_field() {
    let error = ApiError::validation("user_id", "user_id is required");
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    assert_eq!(json["error"]["field"], "user_id");
}

#[tokio::test]
async fn test_unauthorized_returns_401_with_basic_challenge() {
    let error = ApiError::Unauthorized {
        message: "Invalid API key or secret".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let challenge = response.headers().get(WWW_AUTHENTICATE).unwrap();
    assert!(challenge.to_str().unwrap().starts_with("Basic"));
}

#[tokio::test]
async fn test_internal_error_returns_500() {
    let error = ApiError::Internal {
        message: "Failed to persist data".into(),
        location: ErrorLocation::from(Location::caller()),
    };
    let response = error.into_response();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "INTERNAL_ERROR");
}

#[test]
fn test_verification_failure_maps_to_generic_unauthorized() {
    let error = ApiError::from(AuthError::VerificationFailed {
        location: ErrorLocation::from(Location::caller()),
    });

    match error {
        ApiError::Unauthorized { message, .. } => {
            assert_eq!(message, "Webhook verification failed")
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_not_subscribed_defaults_to_bad_request() {
    let error = ApiError::from(DispatchError::NotSubscribed {
        tenant: "proj_site".into(),
        user_id: "u1".into(),
        location: ErrorLocation::from(Location::caller()),
    });

    assert!(matches!(error, ApiError::BadRequest { .. }));
}

#[test]
fn test_provider_error_keeps_provider_message() {
    let error = ApiError::from(DispatchError::from(ProviderError::api(
        503,
        "UNAVAILABLE: try later",
    )));

    match error {
        ApiError::Internal { message, .. } => assert_eq!(message, "503: UNAVAILABLE: try later"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_io_failure_maps_to_generic_internal() {
    let error = ApiError::from(StoreError::io(
        "/data/tokens.json".into(),
        std::io::Error::other("disk full"),
    ));

    match error {
        ApiError::Internal { message, .. } => assert_eq!(message, "Failed to persist data"),
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_invalid_data_payload_maps_to_bad_request() {
    let error = ApiError::from(pr_core::CoreError::invalid_data("data must be a JSON object"));

    assert!(matches!(error, ApiError::BadRequest { .. }));
}
