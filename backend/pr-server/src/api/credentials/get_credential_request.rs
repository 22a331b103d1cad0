use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct GetCredentialRequest {
    /// Host name of the tenant deployment (required)
    #[serde(default)]
    pub endpoint: String,

    /// Challenge token the webhook must echo back (required)
    #[serde(default)]
    pub token: String,

    /// Defaults to https
    #[serde(default)]
    pub protocol: Option<String>,

    /// String or number; omitted from the URL when empty
    #[serde(default)]
    pub port: Option<Value>,

    #[serde(default)]
    pub webhook_route: Option<String>,
}
