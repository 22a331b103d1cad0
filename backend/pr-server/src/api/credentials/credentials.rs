//! Credential bootstrap handler (unauthenticated)

use crate::api::credentials::credential_response::CredentialPair;
use crate::api::validation::value_text;
use crate::{ApiResult, AppState, CredentialResponse, GetCredentialRequest, RequestParams};

use pr_auth::CredentialRequest;

use axum::{Json, extract::State};

/// POST .../auth.get_credential
///
/// Verify the caller's webhook echoes `token`, then mint an API key pair.
pub async fn get_credential(
    State(state): State<AppState>,
    RequestParams(req): RequestParams<GetCredentialRequest>,
) -> ApiResult<Json<CredentialResponse>> {
    let request = CredentialRequest {
        endpoint: req.endpoint,
        protocol: req.protocol,
        port: value_text(req.port),
        token: req.token,
        webhook_route: req.webhook_route,
    };

    let issued = state.issuer.issue(&request).await?;

    Ok(Json(CredentialResponse {
        success: true,
        credentials: CredentialPair {
            api_key: issued.api_key,
            api_secret: issued.api_secret,
        },
    }))
}
