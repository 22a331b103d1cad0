use crate::{ConfigError, ConfigErrorResult};

use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed browser origins; empty allows any origin
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        for origin in &self.allowed_origins {
            if !(origin.starts_with("http://") || origin.starts_with("https://")) {
                return Err(ConfigError::config(format!(
                    "cors.allowed_origins entries must start with http:// or https://, got '{origin}'"
                )));
            }
        }

        Ok(())
    }

    pub fn allows_any(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}
