mod fcm;

use crate::{ProviderError, ProviderResult, PushProvider, TokenOutcome, TopicReport};

use pr_core::{PushMessage, PushTarget};

use std::sync::Mutex;

use async_trait::async_trait;

/// Provider double: records every call and fails the configured tokens.
#[derive(Default)]
pub(crate) struct FakeProvider {
    pub failing_tokens: Vec<String>,
    pub fail_everything: bool,
    pub sent: Mutex<Vec<(PushTarget, PushMessage)>>,
    pub topic_calls: Mutex<Vec<(&'static str, Vec<String>, String)>>,
}

impl FakeProvider {
    pub(crate) fn failing(tokens: &[&str]) -> Self {
        Self {
            failing_tokens: tokens.iter().map(|t| t.to_string()).collect(),
            ..Default::default()
        }
    }

    pub(crate) fn broken() -> Self {
        Self {
            fail_everything: true,
            ..Default::default()
        }
    }

    fn check(&self) -> ProviderResult<()> {
        if self.fail_everything {
            return Err(ProviderError::api(503, "UNAVAILABLE: backend down"));
        }
        Ok(())
    }
}

#[async_trait]
impl PushProvider for FakeProvider {
    async fn send(&self, target: &PushTarget, message: &PushMessage) -> ProviderResult<String> {
        self.check()?;
        self.sent
            .lock()
            .unwrap()
            .push((target.clone(), message.clone()));
        Ok("projects/test/messages/1".to_string())
    }

    async fn send_multicast(
        &self,
        tokens: &[String],
        message: &PushMessage,
    ) -> ProviderResult<Vec<TokenOutcome>> {
        self.check()?;
        let mut sent = self.sent.lock().unwrap();
        Ok(tokens
            .iter()
            .map(|token| {
                sent.push((PushTarget::Token(token.clone()), message.clone()));
                if self.failing_tokens.contains(token) {
                    TokenOutcome::failed(token.as_str(), "NOT_FOUND: UNREGISTERED")
                } else {
                    TokenOutcome::delivered(token.as_str())
                }
            })
            .collect())
    }

    async fn subscribe_topic(&self, tokens: &[String], topic: &str) -> ProviderResult<TopicReport> {
        self.check()?;
        self.topic_calls
            .lock()
            .unwrap()
            .push(("subscribe", tokens.to_vec(), topic.to_string()));
        Ok(TopicReport {
            success_count: tokens.len(),
            failure_count: 0,
        })
    }

    async fn unsubscribe_topic(
        &self,
        tokens: &[String],
        topic: &str,
    ) -> ProviderResult<TopicReport> {
        self.check()?;
        self.topic_calls
            .lock()
            .unwrap()
            .push(("unsubscribe", tokens.to_vec(), topic.to_string()));
        Ok(TopicReport {
            success_count: tokens.len(),
            failure_count: 0,
        })
    }
}
