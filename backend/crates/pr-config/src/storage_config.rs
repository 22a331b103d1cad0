use crate::{ConfigError, ConfigErrorResult, DEFAULT_DATA_DIRECTORY};

use std::path::Path;

use serde::Deserialize;

/// Location of the persisted JSON documents
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Data directory, relative to the config directory
    pub data_dir: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_dir: String::from(DEFAULT_DATA_DIRECTORY),
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> ConfigErrorResult<()> {
        let path = Path::new(&self.data_dir);

        if self.data_dir.trim().is_empty() {
            return Err(ConfigError::storage("storage.data_dir cannot be empty"));
        }

        if path.is_absolute() || self.data_dir.contains("..") {
            return Err(ConfigError::storage(
                "storage.data_dir must be relative and cannot contain '..'",
            ));
        }

        Ok(())
    }
}
