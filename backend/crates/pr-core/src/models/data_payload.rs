use crate::{CoreError, Result as CoreErrorResult};

use std::collections::BTreeMap;

use serde_json::Value;

/// Data field that becomes the notification's click-through link
pub const CLICK_ACTION_FIELD: &str = "click_action";

/// Parse the free-form `data` request field into provider data.
///
/// The field is a JSON object encoded as a string. Missing or blank input
/// yields an empty map. Provider data is string-to-string, so non-string
/// values are carried as their JSON text.
#[track_caller]
pub fn parse_data_payload(raw: Option<&str>) -> CoreErrorResult<BTreeMap<String, String>> {
    let raw = match raw.map(str::trim) {
        Some(raw) if !raw.is_empty() => raw,
        _ => return Ok(BTreeMap::new()),
    };

    let value: Value = serde_json::from_str(raw)
        .map_err(|e| CoreError::invalid_data(format!("data is not valid JSON: {e}")))?;

    let Value::Object(object) = value else {
        return Err(CoreError::invalid_data("data must be a JSON object"));
    };

    Ok(object
        .into_iter()
        .map(|(key, value)| match value {
            Value::String(s) => (key, s),
            other => (key, other.to_string()),
        })
        .collect())
}
