use crate::{ProviderError, ProviderResult};

use std::fmt;
use std::path::Path;

use serde::Deserialize;

const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

/// The fields of a Google service-account key file the provider needs
#[derive(Clone, Deserialize)]
pub struct ServiceAccount {
    pub project_id: String,
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    String::from(DEFAULT_TOKEN_URI)
}

impl ServiceAccount {
    #[track_caller]
    pub fn from_file(path: &Path) -> ProviderResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            ProviderError::init(format!(
                "failed to read service account {}: {}",
                path.display(),
                e
            ))
        })?;

        Self::from_json(&contents)
    }

    #[track_caller]
    pub fn from_json(json: &str) -> ProviderResult<Self> {
        let account: Self = serde_json::from_str(json)
            .map_err(|e| ProviderError::init(format!("invalid service account JSON: {e}")))?;

        if account.project_id.trim().is_empty() {
            return Err(ProviderError::init("service account has no project_id"));
        }

        Ok(account)
    }
}

impl fmt::Debug for ServiceAccount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceAccount")
            .field("project_id", &self.project_id)
            .field("client_email", &self.client_email)
            .field("token_uri", &self.token_uri)
            .finish_non_exhaustive()
    }
}
