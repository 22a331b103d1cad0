use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TopicRequest {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub site_name: String,
    #[serde(default)]
    pub user_id: String,
    #[serde(default)]
    pub topic_name: String,
}
