use crate::{
    CONFIG_DIR_ENV, CONFIG_FILENAME, ConfigError, ConfigErrorResult, CorsConfig,
    DEFAULT_CONFIG_DIR, FcmConfig, LoggingConfig, ServerConfig, StorageConfig, TenantConfig,
};

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::info;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageConfig,
    pub fcm: FcmConfig,
    pub cors: CorsConfig,
    /// Keyed by tenant key (`<project>_<site>`)
    pub tenants: BTreeMap<String, TenantConfig>,
}

impl Config {
    /// Load config.
    ///
    /// Loading order:
    /// 1. Check for PR_CONFIG_DIR env var, else use ./.relay/
    /// 2. Auto-create config directory if it doesn't exist
    /// 3. Load config.toml if it exists, else use defaults
    /// 4. Apply PR_* environment variable overrides
    ///
    /// Does NOT validate - call validate() after load().
    pub fn load() -> ConfigErrorResult<Self> {
        let config_dir = Self::config_dir()?;

        if !config_dir.exists() {
            std::fs::create_dir_all(&config_dir).map_err(|e| ConfigError::Io {
                path: config_dir.clone(),
                source: e,
            })?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);

        let mut config = if config_path.exists() {
            Self::load_toml(&config_path)?
        } else {
            Config::default()
        };

        config.apply_env_overrides();

        Ok(config)
    }

    fn load_toml(path: &Path) -> ConfigErrorResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::Toml {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Get the config directory.
    /// Priority: PR_CONFIG_DIR env var > ./.relay/ (relative to cwd)
    pub fn config_dir() -> ConfigErrorResult<PathBuf> {
        if let Ok(dir) = std::env::var(CONFIG_DIR_ENV) {
            return Ok(PathBuf::from(dir));
        }

        let cwd = std::env::current_dir()
            .map_err(|_| ConfigError::config("Cannot determine current working directory"))?;
        Ok(cwd.join(DEFAULT_CONFIG_DIR))
    }

    /// Validate all configuration.
    /// Call after load() to catch all errors at startup.
    pub fn validate(&self) -> ConfigErrorResult<()> {
        self.server.validate()?;
        self.storage.validate()?;
        self.fcm.validate()?;
        self.cors.validate()?;

        for (key, tenant) in &self.tenants {
            if key.trim().is_empty() {
                return Err(ConfigError::tenant("tenant keys cannot be empty"));
            }
            if tenant.vapid_public_key.trim().is_empty() {
                log::warn!("Tenant '{}' has no vapid_public_key configured", key);
            }
        }

        Ok(())
    }

    /// Absolute path of the directory holding the JSON documents.
    pub fn data_dir(&self) -> ConfigErrorResult<PathBuf> {
        Ok(Self::config_dir()?.join(&self.storage.data_dir))
    }

    /// Absolute path of the FCM service account key, if configured.
    pub fn service_account_path(&self) -> ConfigErrorResult<Option<PathBuf>> {
        let config_dir = Self::config_dir()?;
        Ok(self.fcm.resolved_service_account_path(&config_dir))
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }

    /// Log configuration summary (NEVER logs secrets).
    pub fn log_summary(&self) {
        info!("Configuration loaded:");
        info!(
            "  server: {}:{} ({} trusted proxies)",
            self.server.host,
            self.server.port,
            self.server.trusted_proxies.len()
        );
        info!("  storage: data_dir={}", self.storage.data_dir);
        info!(
            "  logging: {} (colored: {})",
            *self.logging.level, self.logging.colored
        );
        info!(
            "  fcm: service_account={}, timeout={}s",
            if self.fcm.service_account_path.is_some() {
                "configured"
            } else {
                "missing"
            },
            self.fcm.timeout_secs
        );

        if self.cors.allows_any() {
            info!("  cors: any origin");
        } else {
            info!("  cors: {}", self.cors.allowed_origins.join(", "));
        }

        info!("  tenants: {}", self.tenants.len());
    }

    fn apply_env_overrides(&mut self) {
        // Server
        Self::apply_env_string("PR_SERVER_HOST", &mut self.server.host);
        Self::apply_env_parse("PR_SERVER_PORT", &mut self.server.port);

        // Logging
        Self::apply_env_parse("PR_LOG_LEVEL", &mut self.logging.level);
        Self::apply_env_bool("PR_LOG_COLORED", &mut self.logging.colored);
        Self::apply_env_option_string("PR_LOG_FILE", &mut self.logging.file);

        // Storage
        Self::apply_env_string("PR_STORAGE_DATA_DIR", &mut self.storage.data_dir);

        // FCM
        Self::apply_env_option_string(
            "PR_FCM_SERVICE_ACCOUNT_PATH",
            &mut self.fcm.service_account_path,
        );
        Self::apply_env_string("PR_FCM_BASE_URL", &mut self.fcm.fcm_base_url);
        Self::apply_env_string("PR_IID_BASE_URL", &mut self.fcm.iid_base_url);
        Self::apply_env_parse("PR_FCM_TIMEOUT_SECS", &mut self.fcm.timeout_secs);

        // CORS (comma separated)
        if let Ok(val) = std::env::var("PR_CORS_ALLOWED_ORIGINS") {
            self.cors.allowed_origins = val
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }
    }

    /// Helper: Apply environment variable override for String values
    fn apply_env_string(var_name: &str, target: &mut String) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val;
        }
    }

    /// Helper: Apply environment variable override for bool values (accepts "true"/"1")
    fn apply_env_bool(var_name: &str, target: &mut bool) {
        if let Ok(val) = std::env::var(var_name) {
            *target = val == "true" || val == "1";
        }
    }

    /// Helper: Apply environment variable override for parseable values
    fn apply_env_parse<T: std::str::FromStr>(var_name: &str, target: &mut T) {
        if let Ok(val) = std::env::var(var_name)
            && let Ok(parsed) = val.parse()
        {
            *target = parsed;
        }
    }

    /// Helper: Apply environment variable override for Option<String> values
    fn apply_env_option_string(var_name: &str, target: &mut Option<String>) {
        if let Ok(val) = std::env::var(var_name) {
            *target = Some(val);
        }
    }
}
