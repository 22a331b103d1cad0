//! Credential bootstrap.
//!
//! A tenant proves it controls an endpoint by echoing a challenge token from
//! its webhook; only then is an API key/secret pair minted for it.

use crate::{
    API_KEY_LENGTH, API_SECRET_LENGTH, AuthError, CredentialRequest, IssuedCredentials,
    Result as AuthErrorResult, generate_alphanumeric,
};

use pr_store::CredentialStore;

use std::panic::Location;
use std::time::Duration;

use error_location::ErrorLocation;
use log::{info, warn};
use reqwest::StatusCode;

pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Clone)]
pub struct CredentialIssuer {
    client: reqwest::Client,
    store: CredentialStore,
}

impl CredentialIssuer {
    #[track_caller]
    pub fn new(store: CredentialStore) -> AuthErrorResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(WEBHOOK_TIMEOUT)
            .build()
            .map_err(|e| AuthError::Client {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;

        Ok(Self { client, store })
    }

    /// Verify the webhook challenge, then mint and persist a new key pair.
    pub async fn issue(&self, request: &CredentialRequest) -> AuthErrorResult<IssuedCredentials> {
        request.validate()?;

        let url = request.webhook_url();
        if !self.verify_webhook(&url, &request.token).await {
            return Err(AuthError::VerificationFailed {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let credentials = IssuedCredentials {
            api_key: generate_alphanumeric(API_KEY_LENGTH),
            api_secret: generate_alphanumeric(API_SECRET_LENGTH),
        };

        self.store
            .insert(
                credentials.api_key.clone(),
                credentials.api_secret.clone(),
            )
            .await
            .map_err(|e| AuthError::SaveFailed {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            })?;

        info!("Issued API credentials for {}", request.endpoint.trim());

        Ok(credentials)
    }

    /// True only for HTTP 200 with a body identical to `token`.
    async fn verify_webhook(&self, url: &str, token: &str) -> bool {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Webhook {} unreachable: {}", url, e);
                return false;
            }
        };

        let status = response.status();
        if status != StatusCode::OK {
            warn!("Webhook {} answered {}", url, status);
            return false;
        }

        match response.bytes().await {
            Ok(body) if body.as_ref() == token.as_bytes() => true,
            Ok(_) => {
                warn!("Webhook {} returned a body that does not match the token", url);
                false
            }
            Err(e) => {
                warn!("Failed to read webhook {} response: {}", url, e);
                false
            }
        }
    }
}
