//! Public tenant configuration lookup (unauthenticated)

use crate::{ApiError, ApiResult, AppState, RequestParams, TenantConfigQuery, TenantConfigResponse};

use pr_core::TenantKey;

use axum::{Json, extract::State};

/// GET .../get_config
///
/// What a browser client needs to register for web push.
pub async fn get_config(
    State(state): State<AppState>,
    RequestParams(query): RequestParams<TenantConfigQuery>,
) -> ApiResult<Json<TenantConfigResponse>> {
    let tenant = TenantKey::new(&query.project_name, &query.site_name)?;

    let config = state
        .tenants
        .get(tenant.as_str())
        .ok_or_else(|| ApiError::not_found(format!("No configuration for {tenant}")))?;

    Ok(Json(TenantConfigResponse {
        success: true,
        vapid_public_key: config.vapid_public_key.clone(),
        config: config.provider_config.clone(),
    }))
}
