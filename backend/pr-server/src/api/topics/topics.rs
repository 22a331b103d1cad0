//! Topic membership handlers

use crate::api::validation::{required, tenant_user};
use crate::{ApiError, ApiKey, ApiResult, AppState, MessageResponse, RequestParams, TopicRequest};

use pr_push::DispatchError;

use axum::{Json, extract::State};

/// POST .../topic.subscribe
///
/// A user without devices is a 404 here, unlike unsubscribe and send (400).
pub async fn subscribe_topic(
    State(state): State<AppState>,
    _api_key: ApiKey,
    RequestParams(req): RequestParams<TopicRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let (tenant, user_id) = tenant_user(&req.project_name, &req.site_name, &req.user_id)?;
    let topic = required(&req.topic_name, "topic_name")?;

    state
        .dispatcher
        .subscribe(&tenant, &user_id, topic)
        .await
        .map_err(|e| match e {
            DispatchError::NotSubscribed { .. } => {
                ApiError::not_found("User is not subscribed to push notifications")
            }
            other => ApiError::from(other),
        })?;

    Ok(Json(MessageResponse::ok("User subscribed to topic")))
}

/// POST .../topic.unsubscribe
pub async fn unsubscribe_topic(
    State(state): State<AppState>,
    _api_key: ApiKey,
    RequestParams(req): RequestParams<TopicRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let (tenant, user_id) = tenant_user(&req.project_name, &req.site_name, &req.user_id)?;
    let topic = required(&req.topic_name, "topic_name")?;

    state.dispatcher.unsubscribe(&tenant, &user_id, topic).await?;

    Ok(Json(MessageResponse::ok("User unsubscribed from topic")))
}
