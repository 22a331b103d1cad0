use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct UserNotificationRequest {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub user_id: String,

    /// Required
    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub body: String,

    /// Overrides the tenant's default icon
    #[serde(default)]
    pub icon: Option<String>,

    /// JSON object, either as text or inline
    #[serde(default)]
    pub data: Option<Value>,
}
