mod config;
mod cors_config;
mod error;
mod fcm_config;
mod log_level;
mod logging_config;
mod server_config;
mod storage_config;
mod tenant_config;

pub use config::Config;
pub use cors_config::CorsConfig;
pub use error::{ConfigError, ConfigErrorResult};
pub use fcm_config::FcmConfig;
pub use log_level::LogLevel;
pub use logging_config::LoggingConfig;
pub use server_config::ServerConfig;
pub use storage_config::StorageConfig;
pub use tenant_config::TenantConfig;

#[cfg(test)]
mod tests;

const CONFIG_DIR_ENV: &str = "PR_CONFIG_DIR";
const DEFAULT_CONFIG_DIR: &str = ".relay";
const CONFIG_FILENAME: &str = "config.toml";

const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 8000;
const MIN_PORT: u16 = 1024;

const DEFAULT_LOG_LEVEL_STRING: &str = "info";
const DEFAULT_LOG_LEVEL: log::LevelFilter = log::LevelFilter::Info;
const DEFAULT_LOG_DIRECTORY: &str = "log";
const DEFAULT_LOG_COLORED: bool = true;

const DEFAULT_DATA_DIRECTORY: &str = "data";

const DEFAULT_FCM_BASE_URL: &str = "https://fcm.googleapis.com";
const DEFAULT_IID_BASE_URL: &str = "https://iid.googleapis.com";
const DEFAULT_FCM_TIMEOUT_SECS: u64 = 30;
const MIN_FCM_TIMEOUT_SECS: u64 = 1;
const MAX_FCM_TIMEOUT_SECS: u64 = 300;
