//! Notification send handlers

use crate::api::validation::{required, tenant_user, value_text};
use crate::{
    ApiKey, ApiResult, AppState, MessageResponse, RequestParams, TopicNotificationRequest,
    UserNotificationRequest,
};

use pr_push::{TopicNotification, UserNotification};

use axum::{Json, extract::State};

/// POST .../send_notification.user
pub async fn send_to_user(
    State(state): State<AppState>,
    _api_key: ApiKey,
    RequestParams(req): RequestParams<UserNotificationRequest>,
) -> ApiResult<Json<MessageResponse>> {
    let (tenant, user_id) = tenant_user(&req.project_name, &req.site_name, &req.user_id)?;
    required(&req.title, "title")?;

    let report = state
        .dispatcher
        .send_to_user(
            &tenant,
            &user_id,
            UserNotification {
                title: req.title,
                body: req.body,
                icon: req.icon,
                data: value_text(req.data),
            },
        )
        .await?;

    Ok(Json(MessageResponse::ok(format!(
        "Notification sent to {} of {} devices",
        report.success_count, report.total
    ))))
}

/// POST .../send_notification.topic
pub async fn send_to_topic(
    State(state): State<AppState>,
    _api_key: ApiKey,
    RequestParams(req): RequestParams<TopicNotificationRequest>,
) -> ApiResult<Json<MessageResponse>> {
    required(&req.title, "title")?;

    state
        .dispatcher
        .send_to_topic(TopicNotification {
            topic: req.topic_name,
            title: req.title,
            body: req.body,
            data: value_text(req.data),
        })
        .await?;

    Ok(Json(MessageResponse::ok("Notification sent to topic")))
}
