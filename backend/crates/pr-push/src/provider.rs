use crate::{ProviderError, ProviderResult};

use pr_core::{PushMessage, PushTarget};

use async_trait::async_trait;

/// Result of delivering to one token of a multicast
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenOutcome {
    pub token: String,
    pub error: Option<String>,
}

impl TokenOutcome {
    pub fn delivered(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            error: None,
        }
    }

    pub fn failed(token: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            error: Some(error.into()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Per-token counts from a topic (un)subscription batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TopicReport {
    pub success_count: usize,
    pub failure_count: usize,
}

/// Push delivery backend.
///
/// Whole-call failures (authentication, transport, provider outages) are
/// returned as errors. A failed `TokenOutcome` means the provider rejected
/// that token itself, and the caller prunes it.
#[async_trait]
pub trait PushProvider: Send + Sync {
    /// Send one message. Returns the provider's message id.
    async fn send(&self, target: &PushTarget, message: &PushMessage) -> ProviderResult<String>;

    /// Send the same message to every token; one outcome per token, in order.
    async fn send_multicast(
        &self,
        tokens: &[String],
        message: &PushMessage,
    ) -> ProviderResult<Vec<TokenOutcome>>;

    async fn subscribe_topic(&self, tokens: &[String], topic: &str) -> ProviderResult<TopicReport>;

    async fn unsubscribe_topic(&self, tokens: &[String], topic: &str)
    -> ProviderResult<TopicReport>;
}

/// Stand-in used when the real provider could not be initialized at startup.
///
/// Every call fails with the initialization error, so push routes answer
/// 500 while the rest of the relay keeps working.
pub struct UnavailableProvider {
    reason: String,
}

impl UnavailableProvider {
    pub fn new<S: Into<String>>(reason: S) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl PushProvider for UnavailableProvider {
    async fn send(&self, _target: &PushTarget, _message: &PushMessage) -> ProviderResult<String> {
        Err(ProviderError::init(self.reason.clone()))
    }

    async fn send_multicast(
        &self,
        _tokens: &[String],
        _message: &PushMessage,
    ) -> ProviderResult<Vec<TokenOutcome>> {
        Err(ProviderError::init(self.reason.clone()))
    }

    async fn subscribe_topic(
        &self,
        _tokens: &[String],
        _topic: &str,
    ) -> ProviderResult<TopicReport> {
        Err(ProviderError::init(self.reason.clone()))
    }

    async fn unsubscribe_topic(
        &self,
        _tokens: &[String],
        _topic: &str,
    ) -> ProviderResult<TopicReport> {
        Err(ProviderError::init(self.reason.clone()))
    }
}
