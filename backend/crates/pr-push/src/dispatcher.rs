//! Notification dispatch.
//!
//! User sends run RESOLVE_TARGETS → BUILD_MESSAGE → SEND → RECONCILE: look up
//! the user's tokens, build the decorated message, multicast it, then prune
//! every token the provider rejected. Topic sends skip the registry entirely.

use crate::{DispatchError, DispatchResult, PushProvider, TopicReport};

use pr_core::{
    CLICK_ACTION_FIELD, DecorationEngine, PushMessage, PushTarget, TenantKey, parse_data_payload,
};
use pr_store::{DeviceRegistry, IconStore};

use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, info};

/// A send-to-user request after HTTP decoding
#[derive(Debug, Clone, Default)]
pub struct UserNotification {
    pub title: String,
    pub body: String,
    /// Overrides the tenant's default icon
    pub icon: Option<String>,
    /// Raw JSON object text
    pub data: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct TopicNotification {
    pub topic: String,
    pub title: String,
    pub body: String,
    pub data: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchReport {
    pub success_count: usize,
    pub total: usize,
}

#[derive(Clone)]
pub struct Dispatcher {
    registry: DeviceRegistry,
    decorations: Arc<DecorationEngine>,
    icons: Arc<IconStore>,
    provider: Arc<dyn PushProvider>,
}

impl Dispatcher {
    pub fn new(
        registry: DeviceRegistry,
        decorations: Arc<DecorationEngine>,
        icons: Arc<IconStore>,
        provider: Arc<dyn PushProvider>,
    ) -> Self {
        Self {
            registry,
            decorations,
            icons,
            provider,
        }
    }

    pub fn registry(&self) -> &DeviceRegistry {
        &self.registry
    }

    /// Multicast to every device of the user and prune the ones that failed.
    pub async fn send_to_user(
        &self,
        tenant: &TenantKey,
        user_id: &str,
        notification: UserNotification,
    ) -> DispatchResult<DispatchReport> {
        let tokens = self.resolve_tokens(tenant, user_id).await?;

        let message = self.build_user_message(tenant, notification)?;

        let outcomes = self.provider.send_multicast(&tokens, &message).await?;

        let failed: Vec<String> = outcomes
            .iter()
            .filter(|outcome| !outcome.is_success())
            .map(|outcome| outcome.token.clone())
            .collect();
        let report = DispatchReport {
            success_count: outcomes.len() - failed.len(),
            total: tokens.len(),
        };

        if !failed.is_empty() {
            self.registry.prune(tenant, user_id, &failed).await?;
        }

        info!(
            "Notification for {}/{} delivered to {} of {} devices",
            tenant, user_id, report.success_count, report.total
        );

        Ok(report)
    }

    /// Send one topic-addressed message. No registry involvement.
    pub async fn send_to_topic(&self, notification: TopicNotification) -> DispatchResult<String> {
        let topic = Self::require_topic(&notification.topic)?;
        let data = parse_data_payload(notification.data.as_deref())?;

        let message = PushMessage {
            title: self.decorations.decorate_topic(topic, &notification.title),
            body: notification.body,
            icon: None,
            link: data.get(CLICK_ACTION_FIELD).cloned(),
            data,
        };

        let message_id = self
            .provider
            .send(&PushTarget::Topic(topic.to_string()), &message)
            .await?;

        info!("Notification sent to topic {}", topic);

        Ok(message_id)
    }

    pub async fn subscribe(
        &self,
        tenant: &TenantKey,
        user_id: &str,
        topic: &str,
    ) -> DispatchResult<TopicReport> {
        let topic = Self::require_topic(topic)?;
        let tokens = self.resolve_tokens(tenant, user_id).await?;

        let report = self.provider.subscribe_topic(&tokens, topic).await?;
        info!("{}/{} subscribed to topic {}", tenant, user_id, topic);

        Ok(report)
    }

    pub async fn unsubscribe(
        &self,
        tenant: &TenantKey,
        user_id: &str,
        topic: &str,
    ) -> DispatchResult<TopicReport> {
        let topic = Self::require_topic(topic)?;
        let tokens = self.resolve_tokens(tenant, user_id).await?;

        let report = self.provider.unsubscribe_topic(&tokens, topic).await?;
        info!("{}/{} unsubscribed from topic {}", tenant, user_id, topic);

        Ok(report)
    }

    async fn resolve_tokens(&self, tenant: &TenantKey, user_id: &str) -> DispatchResult<Vec<String>> {
        self.registry
            .lookup(tenant, user_id)
            .await
            .ok_or_else(|| DispatchError::NotSubscribed {
                tenant: tenant.to_string(),
                user_id: user_id.to_string(),
                location: ErrorLocation::from(Location::caller()),
            })
    }

    fn build_user_message(
        &self,
        tenant: &TenantKey,
        notification: UserNotification,
    ) -> DispatchResult<PushMessage> {
        let data = parse_data_payload(notification.data.as_deref())?;

        let icon = notification
            .icon
            .filter(|icon| !icon.trim().is_empty())
            .or_else(|| self.icons.default_icon(tenant));

        let title = self.decorations.decorate(tenant, &notification.title);
        if title != notification.title {
            debug!("Decorated title for {}: {:?}", tenant, title);
        }

        Ok(PushMessage {
            title,
            body: notification.body,
            icon,
            link: data.get(CLICK_ACTION_FIELD).cloned(),
            data,
        })
    }

    #[track_caller]
    fn require_topic(topic: &str) -> DispatchResult<&str> {
        let topic = topic.trim();
        if topic.is_empty() {
            return Err(DispatchError::EmptyTopic {
                location: ErrorLocation::from(Location::caller()),
            });
        }
        Ok(topic)
    }
}
