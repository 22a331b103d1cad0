use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Missing authorization header {location}")]
    MissingHeader { location: ErrorLocation },

    #[error("Invalid authorization scheme: expected 'Basic' {location}")]
    InvalidScheme { location: ErrorLocation },

    #[error("Malformed Basic credentials {location}")]
    MalformedCredentials { location: ErrorLocation },

    #[error("Invalid API key or secret {location}")]
    InvalidCredentials { location: ErrorLocation },

    /// Deliberately carries no detail: callers can't tell a bad status from a
    /// bad body or an unreachable endpoint.
    #[error("Webhook verification failed {location}")]
    VerificationFailed { location: ErrorLocation },

    #[error("Failed to save credentials {location}")]
    SaveFailed {
        #[source]
        source: pr_store::StoreError,
        location: ErrorLocation,
    },

    #[error("Validation error on '{field}': {message} {location}")]
    Validation {
        field: String,
        message: String,
        location: ErrorLocation,
    },

    #[error("HTTP client initialization failed: {source} {location}")]
    Client {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },
}

impl AuthError {
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::MissingHeader { .. } => "MISSING_AUTH_HEADER",
            Self::InvalidScheme { .. } => "INVALID_AUTH_SCHEME",
            Self::MalformedCredentials { .. } => "MALFORMED_CREDENTIALS",
            Self::InvalidCredentials { .. } => "INVALID_CREDENTIALS",
            Self::VerificationFailed { .. } => "VERIFICATION_FAILED",
            Self::SaveFailed { .. } => "SAVE_FAILED",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::Client { .. } => "CLIENT_ERROR",
        }
    }

    pub fn field(&self) -> Option<String> {
        match self {
            Self::Validation { field, .. } => Some(field.clone()),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
