use crate::{AuthError, Result as AuthErrorResult};

use pr_store::CredentialStore;

use std::panic::Location;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use error_location::ErrorLocation;
use subtle::ConstantTimeEq;

const BASIC_PREFIX: &str = "Basic ";

/// `api_key:api_secret` pair from an `Authorization: Basic` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BasicCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl BasicCredentials {
    /// Parse the raw `Authorization` header value.
    #[track_caller]
    pub fn parse(header: Option<&str>) -> AuthErrorResult<Self> {
        let header = header.ok_or_else(|| AuthError::MissingHeader {
            location: ErrorLocation::from(Location::caller()),
        })?;

        let encoded = header
            .strip_prefix(BASIC_PREFIX)
            .ok_or_else(|| AuthError::InvalidScheme {
                location: ErrorLocation::from(Location::caller()),
            })?;

        let malformed = || AuthError::MalformedCredentials {
            location: ErrorLocation::from(Location::caller()),
        };

        let decoded = STANDARD.decode(encoded.trim()).map_err(|_| malformed())?;
        let decoded = String::from_utf8(decoded).map_err(|_| malformed())?;
        let (api_key, api_secret) = decoded.split_once(':').ok_or_else(malformed)?;

        if api_key.is_empty() {
            return Err(malformed());
        }

        Ok(Self {
            api_key: api_key.to_string(),
            api_secret: api_secret.to_string(),
        })
    }

    /// Check the pair against the stored credentials.
    pub async fn verify(&self, store: &CredentialStore) -> AuthErrorResult<()> {
        let matches = match store.secret_for(&self.api_key).await {
            Some(secret) => bool::from(secret.as_bytes().ct_eq(self.api_secret.as_bytes())),
            None => false,
        };

        if matches {
            Ok(())
        } else {
            Err(AuthError::InvalidCredentials {
                location: ErrorLocation::from(Location::caller()),
            })
        }
    }
}
