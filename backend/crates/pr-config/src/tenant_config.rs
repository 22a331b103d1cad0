use serde::Deserialize;
use serde_json::Value;

/// Per-tenant settings handed to web clients so they can subscribe to push.
///
/// ```toml
/// [tenants.myproject_mysite]
/// vapid_public_key = "BExample..."
/// provider_config = { apiKey = "...", projectId = "...", messagingSenderId = "..." }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TenantConfig {
    /// Public key for the client's web push subscription
    pub vapid_public_key: String,
    /// Opaque provider configuration blob returned as-is
    pub provider_config: Value,
}
