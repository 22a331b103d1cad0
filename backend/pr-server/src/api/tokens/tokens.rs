//! Device token registration handlers

use crate::api::validation::{required, tenant_user};
use crate::{ApiKey, ApiResult, AppState, MessageResponse, RequestParams, TokenRequest};

use pr_store::{AddOutcome, RemoveOutcome};

use axum::{Json, extract::State};

/// POST .../token.add
pub async fn add_token(
    State(state): State<AppState>,
    _api_key: ApiKey,
    RequestParams(req): RequestParams<TokenRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let (tenant, user_id) = tenant_user(&req.project_name, &req.site_name, &req.user_id)?;
    let token = required(&req.fcm_token, "fcm_token")?;

    let message = match state.registry.add_token(&tenant, &user_id, token).await? {
        AddOutcome::Added => "User Token added",
        AddOutcome::Duplicate => "User Token duplicate found",
    };

    Ok(Json(MessageResponse::ok(message)))
}

/// POST .../token.remove
///
/// Removing an unknown token answers exactly like a real removal.
pub async fn remove_token(
    State(state): State<AppState>,
    _api_key: ApiKey,
    RequestParams(req): RequestParams<TokenRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let (tenant, user_id) = tenant_user(&req.project_name, &req.site_name, &req.user_id)?;
    let token = required(&req.fcm_token, "fcm_token")?;

    match state.registry.remove_token(&tenant, &user_id, token).await? {
        RemoveOutcome::Removed => {}
        RemoveOutcome::NotFound => {
            log::debug!("Token for {}/{} was not registered", tenant, user_id);
        }
    }

    Ok(Json(MessageResponse::ok("User Token removed")))
}
