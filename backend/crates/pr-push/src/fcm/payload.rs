use pr_core::{PushMessage, PushTarget};

use serde_json::{Map, Value, json};

const TOPIC_PREFIX: &str = "/topics/";

/// Topic name without a leading `/topics/`
pub(crate) fn topic_name(topic: &str) -> &str {
    topic.strip_prefix(TOPIC_PREFIX).unwrap_or(topic)
}

/// `{"message": {...}}` body for `messages:send`
pub(crate) fn build_message(target: &PushTarget, message: &PushMessage) -> Value {
    let mut body = Map::new();

    match target {
        PushTarget::Token(token) => body.insert("token".into(), json!(token)),
        PushTarget::Topic(topic) => body.insert("topic".into(), json!(topic_name(topic))),
    };

    body.insert(
        "notification".into(),
        json!({
            "title": message.title,
            "body": message.body,
        }),
    );

    if !message.data.is_empty() {
        body.insert("data".into(), json!(message.data));
    }

    let mut webpush = Map::new();
    if let Some(icon) = &message.icon {
        webpush.insert("notification".into(), json!({ "icon": icon }));
    }
    if let Some(link) = &message.link {
        webpush.insert("fcm_options".into(), json!({ "link": link }));
    }
    if !webpush.is_empty() {
        body.insert("webpush".into(), Value::Object(webpush));
    }

    json!({ "message": body })
}

/// Best-effort extraction of `error.status` / `error.message` from an FCM error body
pub(crate) fn api_error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<Value>(body).ok();
    let error = parsed.as_ref().and_then(|v| v.get("error"));

    let status = error.and_then(|e| e.get("status")).and_then(Value::as_str);
    let message = error.and_then(|e| e.get("message")).and_then(Value::as_str);

    match (status, message) {
        (Some(status), Some(message)) => format!("{status}: {message}"),
        (None, Some(message)) => message.to_string(),
        _ => body.trim().to_string(),
    }
}
