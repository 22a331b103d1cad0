use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct TopicNotificationRequest {
    #[serde(default)]
    pub topic_name: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub data: Option<Value>,
}
