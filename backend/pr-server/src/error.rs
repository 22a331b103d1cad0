use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Config error: {0}")]
    Config(#[from] pr_config::ConfigError),

    #[error("Storage error: {0}")]
    Store(#[from] pr_store::StoreError),

    #[error("Auth setup error: {0}")]
    Auth(#[from] pr_auth::AuthError),

    #[error("Logger error: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ServerError>;
