use crate::{ApiError, RequestParams, TokenRequest};

use axum::body::Body;
use axum::extract::FromRequest;
use http::Request;

async fn extract(request: Request<Body>) -> Result<TokenRequest, ApiError> {
    RequestParams::<TokenRequest>::from_request(request, &())
        .await
        .map(|RequestParams(params)| params)
}

#[tokio::test]
async fn test_json_body_is_parsed() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"project_name":"proj","site_name":"site","user_id":"u1","fcm_token":"T1"}"#,
        ))
        .unwrap();

    let params = extract(request).await.unwrap();

    assert_eq!(params.project_name, "proj");
    assert_eq!(params.fcm_token, "T1");
}

#[tokio::test]
async fn test_form_body_is_parsed() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/x-www-form-urlencoded; charset=utf-8")
        .body(Body::from("project_name=proj&site_name=site&user_id=u1&fcm_token=T%2B1"))
        .unwrap();

    let params = extract(request).await.unwrap();

    assert_eq!(params.user_id, "u1");
    assert_eq!(params.fcm_token, "T+1");
}

#[tokio::test]
async fn test_query_string_is_parsed_without_content_type() {
    let request = Request::builder()
        .method("POST")
        .uri("/?project_name=proj&site_name=site&user_id=u1&fcm_token=T1")
        .body(Body::empty())
        .unwrap();

    let params = extract(request).await.unwrap();

    assert_eq!(params.site_name, "site");
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let result = extract(request).await;

    assert!(matches!(result, Err(ApiError::BadRequest { .. })));
}
