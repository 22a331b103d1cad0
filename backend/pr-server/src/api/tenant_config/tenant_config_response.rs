use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Serialize)]
pub struct TenantConfigResponse {
    pub success: bool,
    pub vapid_public_key: String,
    pub config: Value,
}
