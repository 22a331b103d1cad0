use crate::ApiError;
use crate::api::validation::{required, tenant_user, value_text};

use googletest::assert_that;
use googletest::prelude::{eq, none, some};
use serde_json::json;

#[test]
fn given_padded_value_when_required_then_trimmed() {
    let value = required("  u1 ", "user_id").unwrap();

    assert_that!(value.to_string(), eq("u1"));
}

#[test]
fn given_blank_value_when_required_then_validation_error_names_field() {
    let result = required("   ", "fcm_token");

    assert!(matches!(
        result,
        Err(ApiError::Validation { field: Some(ref field), .. }) if field == "fcm_token"
    ));
}

#[test]
fn given_project_and_site_when_tenant_user_then_key_joined() {
    let (tenant, user_id) = tenant_user("proj", "site", "u1").unwrap();

    assert_that!(tenant.to_string(), eq("proj_site"));
    assert_that!(user_id, eq("u1"));
}

#[test]
fn given_missing_site_when_tenant_user_then_validation_error() {
    let result = tenant_user("proj", "", "u1");

    assert!(matches!(
        result,
        Err(ApiError::Validation { field: Some(ref field), .. }) if field == "site_name"
    ));
}

#[test]
fn given_loose_values_when_converted_then_text() {
    assert_that!(value_text(Some(json!("8080"))), some(eq("8080")));
    assert_that!(value_text(Some(json!(8080))), some(eq("8080")));
    assert_that!(value_text(Some(json!({"a": 1}))), some(eq(r#"{"a":1}"#)));
    assert_that!(value_text(Some(json!(null))), none());
    assert_that!(value_text(None), none());
}
