use std::panic::Location;
use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Validation error: {message} {location}")]
    Validation {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    #[error("Invalid data payload: {message} {location}")]
    InvalidDataPayload {
        message: String,
        location: ErrorLocation,
    },
}

impl CoreError {
    /// Create a validation error for a required field
    #[track_caller]
    pub fn missing_field(field: &str) -> Self {
        CoreError::Validation {
            message: format!("{field} is required"),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_field<S: Into<String>>(field: &str, message: S) -> Self {
        CoreError::Validation {
            message: message.into(),
            field: Some(field.to_string()),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_data<S: Into<String>>(message: S) -> Self {
        CoreError::InvalidDataPayload {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }
}

pub type Result<T> = StdResult<T, CoreError>;
