use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub fcm_token: String,
}
