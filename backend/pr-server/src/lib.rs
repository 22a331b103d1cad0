pub mod api;
pub mod app_state;
pub mod error;
pub mod health;
pub mod logger;
pub mod routes;

#[cfg(test)]
mod tests;

pub use api::{
    credentials::{
        credential_response::CredentialResponse, credentials::get_credential,
        get_credential_request::GetCredentialRequest,
    },
    error::ApiError,
    error::Result as ApiResult,
    extractors::{api_key::ApiKey, request_params::RequestParams},
    message_response::MessageResponse,
    notifications::{
        notifications::{send_to_topic, send_to_user},
        topic_notification_request::TopicNotificationRequest,
        user_notification_request::UserNotificationRequest,
    },
    tenant_config::{
        tenant_config::get_config, tenant_config_query::TenantConfigQuery,
        tenant_config_response::TenantConfigResponse,
    },
    tokens::{
        token_request::TokenRequest,
        tokens::{add_token, remove_token},
    },
    topics::{
        topic_request::TopicRequest,
        topics::{subscribe_topic, unsubscribe_topic},
    },
};
pub use app_state::AppState;

pub use crate::routes::{API_PREFIX, build_router};
