use crate::{AuthError, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;

const DEFAULT_PROTOCOL: &str = "https";

/// Input to a credential bootstrap: where the tenant's webhook lives and the
/// challenge token it must echo back.
#[derive(Debug, Clone, Default)]
pub struct CredentialRequest {
    pub endpoint: String,
    pub protocol: Option<String>,
    pub port: Option<String>,
    pub token: String,
    pub webhook_route: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedCredentials {
    pub api_key: String,
    pub api_secret: String,
}

impl CredentialRequest {
    #[track_caller]
    pub fn validate(&self) -> AuthErrorResult<()> {
        if self.endpoint.trim().is_empty() {
            return Err(AuthError::Validation {
                field: "endpoint".to_string(),
                message: "endpoint is required".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if self.token.is_empty() {
            return Err(AuthError::Validation {
                field: "token".to_string(),
                message: "token is required".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(())
    }

    /// `{protocol}://{endpoint}[:{port}]{/webhook_route}`
    pub fn webhook_url(&self) -> String {
        let protocol = non_blank(self.protocol.as_deref()).unwrap_or(DEFAULT_PROTOCOL);
        let mut url = format!("{}://{}", protocol, self.endpoint.trim());

        if let Some(port) = non_blank(self.port.as_deref()) {
            url.push(':');
            url.push_str(port);
        }

        if let Some(route) = non_blank(self.webhook_route.as_deref()) {
            if !route.starts_with('/') {
                url.push('/');
            }
            url.push_str(route);
        }

        url
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
