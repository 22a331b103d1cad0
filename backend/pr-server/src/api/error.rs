//! REST API error types
//!
//! Every error renders as `{"success": false, "error": {code, message, field?}}`
//! with the matching HTTP status.

use pr_auth::AuthError;
use pr_core::CoreError;
use pr_push::DispatchError;
use pr_store::StoreError;

use std::panic::Location;

use axum::{
    Json,
    http::{HeaderValue, StatusCode, header::WWW_AUTHENTICATE},
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

const BASIC_CHALLENGE: &str = "Basic realm=\"notification_relay\"";

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub success: bool,
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "VALIDATION_ERROR")
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// 404
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// 400
    #[error("Validation failed: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// 400
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        location: ErrorLocation,
    },

    /// 401, with a Basic challenge
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// 500
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn validation<S: Into<String>>(field: &str, message: S) -> Self {
        ApiError::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        ApiError::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Internal { .. } => log::error!("{}", self),
            _ => log::warn!("{}", self),
        }

        let challenge = matches!(self, ApiError::Unauthorized { .. });

        let (status, body) = match self {
            ApiError::NotFound { message, .. } => (
                StatusCode::NOT_FOUND,
                ApiErrorBody {
                    code: "NOT_FOUND".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Validation { message, field, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "VALIDATION_ERROR".into(),
                    message,
                    field,
                },
            ),
            ApiError::BadRequest { message, .. } => (
                StatusCode::BAD_REQUEST,
                ApiErrorBody {
                    code: "BAD_REQUEST".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Unauthorized { message, .. } => (
                StatusCode::UNAUTHORIZED,
                ApiErrorBody {
                    code: "UNAUTHORIZED".into(),
                    message,
                    field: None,
                },
            ),
            ApiError::Internal { message, .. } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                ApiErrorBody {
                    code: "INTERNAL_ERROR".into(),
                    message,
                    field: None,
                },
            ),
        };

        let mut response = (
            status,
            Json(ApiErrorResponse {
                success: false,
                error: body,
            }),
        )
            .into_response();

        if challenge {
            response
                .headers_mut()
                .insert(WWW_AUTHENTICATE, HeaderValue::from_static(BASIC_CHALLENGE));
        }

        response
    }
}

impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        match e {
            CoreError::Validation { message, field, .. } => ApiError::Validation {
                message,
                field,
                location: ErrorLocation::from(Location::caller()),
            },
            CoreError::InvalidDataPayload { message, .. } => ApiError::BadRequest {
                message,
                location: ErrorLocation::from(Location::caller()),
            },
        }
    }
}

impl From<AuthError> for ApiError {
    #[track_caller]
    fn from(e: AuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            AuthError::Validation { field, message, .. } => ApiError::Validation {
                message,
                field: Some(field),
                location,
            },
            AuthError::MissingHeader { .. } => ApiError::Unauthorized {
                message: "Authorization header is required".to_string(),
                location,
            },
            AuthError::InvalidScheme { .. } | AuthError::MalformedCredentials { .. } => {
                ApiError::Unauthorized {
                    message: "Expected Basic api_key:api_secret credentials".to_string(),
                    location,
                }
            }
            AuthError::InvalidCredentials { .. } => ApiError::Unauthorized {
                message: "Invalid API key or secret".to_string(),
                location,
            },
            AuthError::VerificationFailed { .. } => ApiError::Unauthorized {
                message: "Webhook verification failed".to_string(),
                location,
            },
            AuthError::SaveFailed { source, .. } => {
                log::error!("Credential persistence failed: {}", source);
                ApiError::Internal {
                    message: "Failed to save credentials".to_string(),
                    location,
                }
            }
            AuthError::Client { source, .. } => ApiError::Internal {
                message: format!("HTTP client error: {source}"),
                location,
            },
        }
    }
}

impl From<StoreError> for ApiError {
    #[track_caller]
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::EmptyToken { .. } => {
                ApiError::validation("fcm_token", "fcm_token is required")
            }
            StoreError::Io { .. } | StoreError::Json { .. } => {
                // Memory already holds the change; only the file write failed.
                log::error!("Persistence failed: {}", e);
                ApiError::Internal {
                    message: "Failed to persist data".to_string(),
                    location: ErrorLocation::from(Location::caller()),
                }
            }
        }
    }
}

/// `NotSubscribed` maps to 400 here; the subscribe handler turns it into 404.
impl From<DispatchError> for ApiError {
    #[track_caller]
    fn from(e: DispatchError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            DispatchError::NotSubscribed { .. } => ApiError::BadRequest {
                message: "User is not subscribed to push notifications".to_string(),
                location,
            },
            DispatchError::EmptyTopic { .. } => {
                ApiError::validation("topic_name", "topic_name is required")
            }
            DispatchError::InvalidData { source, .. } => ApiError::from(source),
            DispatchError::Provider { source, .. } => ApiError::Internal {
                message: source.provider_message(),
                location,
            },
            DispatchError::Store { source, .. } => ApiError::from(source),
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
