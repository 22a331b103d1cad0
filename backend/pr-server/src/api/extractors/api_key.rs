//! HTTP Basic authentication against issued API credentials

use crate::{ApiError, AppState};

use pr_auth::BasicCredentials;

use std::future::Future;

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts},
};

/// The authenticated caller's API key
pub struct ApiKey(pub String);

impl FromRequestParts<AppState> for ApiKey {
    type Rejection = ApiError;

    #[allow(clippy::manual_async_fn)]
    fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> impl Future<Output = Result<Self, Self::Rejection>> + Send {
        async move {
            let header = parts
                .headers
                .get(AUTHORIZATION)
                .and_then(|value| value.to_str().ok());

            let credentials = BasicCredentials::parse(header)?;
            credentials.verify(&state.credentials).await?;

            log::debug!("Authenticated API key {}", pr_core::redact_token(&credentials.api_key));

            Ok(ApiKey(credentials.api_key))
        }
    }
}
