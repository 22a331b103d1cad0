use pr_core::CoreError;
use pr_store::StoreError;

use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Push provider unavailable: {message} {location}")]
    Init {
        message: String,
        location: ErrorLocation,
    },

    #[error("Push provider authentication failed: {message} {location}")]
    Auth {
        message: String,
        location: ErrorLocation,
    },

    #[error("Push provider request failed: {source} {location}")]
    Request {
        #[source]
        source: reqwest::Error,
        location: ErrorLocation,
    },

    #[error("Push provider returned {status}: {message} {location}")]
    Api {
        status: u16,
        message: String,
        location: ErrorLocation,
    },
}

impl ProviderError {
    #[track_caller]
    pub fn init<S: Into<String>>(message: S) -> Self {
        Self::Init {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn auth<S: Into<String>>(message: S) -> Self {
        Self::Auth {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn api<S: Into<String>>(status: u16, message: S) -> Self {
        Self::Api {
            status,
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// True when the provider refused the addressed device token itself:
    /// FCM answers 404 for unregistered tokens and 400 for malformed ones.
    pub fn is_token_rejection(&self) -> bool {
        match self {
            Self::Api { status: 404, .. } => true,
            Self::Api {
                status: 400,
                message,
                ..
            } => message.contains("registration token") || message.contains("UNREGISTERED"),
            _ => false,
        }
    }

    /// The provider's own message, without source location, for API responses
    pub fn provider_message(&self) -> String {
        match self {
            Self::Init { message, .. } | Self::Auth { message, .. } => message.clone(),
            Self::Request { source, .. } => source.to_string(),
            Self::Api {
                status, message, ..
            } => format!("{status}: {message}"),
        }
    }
}

impl From<reqwest::Error> for ProviderError {
    #[track_caller]
    fn from(source: reqwest::Error) -> Self {
        Self::Request {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type ProviderResult<T> = std::result::Result<T, ProviderError>;

#[derive(Error, Debug)]
pub enum DispatchError {
    #[error("User {user_id} has no registered devices for {tenant} {location}")]
    NotSubscribed {
        tenant: String,
        user_id: String,
        location: ErrorLocation,
    },

    #[error("topic_name is required {location}")]
    EmptyTopic { location: ErrorLocation },

    #[error("{source}")]
    InvalidData {
        #[source]
        source: CoreError,
        location: ErrorLocation,
    },

    #[error("{source}")]
    Provider {
        #[source]
        source: ProviderError,
        location: ErrorLocation,
    },

    #[error("Failed to persist device registry: {source} {location}")]
    Store {
        #[source]
        source: StoreError,
        location: ErrorLocation,
    },
}

impl From<CoreError> for DispatchError {
    #[track_caller]
    fn from(source: CoreError) -> Self {
        Self::InvalidData {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<ProviderError> for DispatchError {
    #[track_caller]
    fn from(source: ProviderError) -> Self {
        Self::Provider {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl From<StoreError> for DispatchError {
    #[track_caller]
    fn from(source: StoreError) -> Self {
        Self::Store {
            source,
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type DispatchResult<T> = std::result::Result<T, DispatchError>;
