use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct TenantConfigQuery {
    #[serde(default)]
    pub project_name: String,
    #[serde(default)]
    pub site_name: String,
}
