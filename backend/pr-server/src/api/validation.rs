use crate::{ApiError, ApiResult};

use pr_core::TenantKey;

use serde_json::Value;

/// Trimmed value of a required text field
#[track_caller]
pub fn required<'a>(value: &'a str, field: &str) -> ApiResult<&'a str> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ApiError::validation(field, format!("{field} is required")));
    }
    Ok(value)
}

/// Tenant key plus user id, the addressing every per-user route shares
#[track_caller]
pub fn tenant_user(
    project_name: &str,
    site_name: &str,
    user_id: &str,
) -> ApiResult<(TenantKey, String)> {
    let tenant = TenantKey::new(project_name, site_name)?;
    let user_id = required(user_id, "user_id")?;
    Ok((tenant, user_id.to_string()))
}

/// Text form of a loosely typed field.
///
/// JSON clients may send `data` as an object and `port` as a number, while
/// form and query clients always send strings.
pub fn value_text(value: Option<Value>) -> Option<String> {
    match value? {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}
