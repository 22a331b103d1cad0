use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_FCM_BASE_URL, DEFAULT_FCM_TIMEOUT_SECS,
    DEFAULT_IID_BASE_URL, MAX_FCM_TIMEOUT_SECS, MIN_FCM_TIMEOUT_SECS,
};

use std::path::{Path, PathBuf};

use serde::Deserialize;

/// Firebase Cloud Messaging provider settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FcmConfig {
    /// Service account key file; relative paths resolve against the config directory
    pub service_account_path: Option<String>,
    /// FCM HTTP v1 endpoint
    pub fcm_base_url: String,
    /// Instance ID endpoint used for topic membership
    pub iid_base_url: String,
    pub timeout_secs: u64,
}

impl Default for FcmConfig {
    fn default() -> Self {
        Self {
            service_account_path: None,
            fcm_base_url: String::from(DEFAULT_FCM_BASE_URL),
            iid_base_url: String::from(DEFAULT_IID_BASE_URL),
            timeout_secs: DEFAULT_FCM_TIMEOUT_SECS,
        }
    }
}

impl FcmConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        if !(MIN_FCM_TIMEOUT_SECS..=MAX_FCM_TIMEOUT_SECS).contains(&self.timeout_secs) {
            return Err(ConfigError::provider(format!(
                "fcm.timeout_secs must be {}-{}, got {}",
                MIN_FCM_TIMEOUT_SECS, MAX_FCM_TIMEOUT_SECS, self.timeout_secs
            )));
        }

        for (name, url) in [
            ("fcm.fcm_base_url", &self.fcm_base_url),
            ("fcm.iid_base_url", &self.iid_base_url),
        ] {
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::provider(format!(
                    "{name} must be an http(s) URL, got '{url}'"
                )));
            }
        }

        if let Some(ref path) = self.service_account_path
            && path.trim().is_empty()
        {
            return Err(ConfigError::provider(
                "fcm.service_account_path cannot be empty when set",
            ));
        }

        Ok(())
    }

    /// Resolve the service account path against the config directory.
    pub fn resolved_service_account_path(&self, config_dir: &Path) -> Option<PathBuf> {
        self.service_account_path.as_ref().map(|path| {
            let path = Path::new(path);
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                config_dir.join(path)
            }
        })
    }
}
