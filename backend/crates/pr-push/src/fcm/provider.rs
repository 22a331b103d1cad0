use crate::fcm::{AccessTokenSource, api_error_message, build_message, topic_name};
use crate::{
    ProviderError, ProviderResult, PushProvider, ServiceAccount, TokenOutcome, TopicReport,
};

use pr_config::FcmConfig;
use pr_core::{PushMessage, PushTarget, redact_token};

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, error, info, warn};
use serde::Deserialize;
use serde_json::json;

#[derive(Debug, Deserialize)]
struct SendResponse {
    #[serde(default)]
    name: String,
}

#[derive(Debug, Deserialize)]
struct BatchResponse {
    #[serde(default)]
    results: Vec<BatchResult>,
}

#[derive(Debug, Deserialize)]
struct BatchResult {
    #[serde(default)]
    error: Option<String>,
}

pub struct FcmProvider {
    client: reqwest::Client,
    project_id: String,
    fcm_base_url: String,
    iid_base_url: String,
    access_tokens: AccessTokenSource,
}

impl FcmProvider {
    /// Build from config; fails when no service account is configured or it
    /// can't be read.
    #[track_caller]
    pub fn from_config(
        config: &FcmConfig,
        service_account_path: Option<&Path>,
    ) -> ProviderResult<Self> {
        let path = service_account_path
            .ok_or_else(|| ProviderError::init("fcm.service_account_path is not configured"))?;

        let account = ServiceAccount::from_file(path)?;
        Self::new(account, config)
    }

    #[track_caller]
    pub fn new(account: ServiceAccount, config: &FcmConfig) -> ProviderResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::init(format!("failed to build HTTP client: {e}")))?;

        let project_id = account.project_id.clone();
        let access_tokens = AccessTokenSource::new(account, client.clone())?;

        info!("FCM provider initialized for project {}", project_id);

        Ok(Self {
            client,
            project_id,
            fcm_base_url: config.fcm_base_url.trim_end_matches('/').to_string(),
            iid_base_url: config.iid_base_url.trim_end_matches('/').to_string(),
            access_tokens,
        })
    }

    fn send_url(&self) -> String {
        format!(
            "{}/v1/projects/{}/messages:send",
            self.fcm_base_url, self.project_id
        )
    }

    async fn send_with_token(
        &self,
        access_token: &str,
        target: &PushTarget,
        message: &PushMessage,
    ) -> ProviderResult<String> {
        let response = self
            .client
            .post(self.send_url())
            .bearer_auth(access_token)
            .json(&build_message(target, message))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::api(status.as_u16(), api_error_message(&body)));
        }

        let sent: SendResponse = response.json().await?;
        Ok(sent.name)
    }

    /// `batchAdd` / `batchRemove` on the Instance ID service
    async fn manage_topic(
        &self,
        action: &str,
        tokens: &[String],
        topic: &str,
    ) -> ProviderResult<TopicReport> {
        let access_token = self.access_tokens.token().await?;
        let url = format!("{}/iid/v1:{}", self.iid_base_url, action);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&access_token)
            .header("access_token_auth", "true")
            .json(&json!({
                "to": format!("/topics/{}", topic_name(topic)),
                "registration_tokens": tokens,
            }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::api(status.as_u16(), api_error_message(&body)));
        }

        let batch: BatchResponse = response.json().await?;
        let failure_count = batch.results.iter().filter(|r| r.error.is_some()).count();
        let report = TopicReport {
            success_count: tokens.len().saturating_sub(failure_count),
            failure_count,
        };

        if failure_count > 0 {
            warn!(
                "{} of {} token(s) failed {} for topic {}",
                failure_count,
                tokens.len(),
                action,
                topic
            );
        }

        Ok(report)
    }
}

#[async_trait]
impl PushProvider for FcmProvider {
    async fn send(&self, target: &PushTarget, message: &PushMessage) -> ProviderResult<String> {
        let access_token = self.access_tokens.token().await?;
        let name = self.send_with_token(&access_token, target, message).await?;
        debug!("FCM accepted message {}", name);
        Ok(name)
    }

    async fn send_multicast(
        &self,
        tokens: &[String],
        message: &PushMessage,
    ) -> ProviderResult<Vec<TokenOutcome>> {
        let access_token = self.access_tokens.token().await?;

        let sends = tokens.iter().map(|token| {
            let target = PushTarget::Token(token.clone());
            let access_token = &access_token;
            async move { self.send_with_token(access_token, &target, message).await }
        });
        let results = join_all(sends).await;

        // Per-token outcomes only carry rejections of the token itself; any
        // other failure fails the whole multicast.
        let mut outcomes = Vec::with_capacity(tokens.len());
        for (token, result) in tokens.iter().zip(results) {
            match result {
                Ok(_) => outcomes.push(TokenOutcome::delivered(token.as_str())),
                Err(e) if e.is_token_rejection() => {
                    warn!("FCM rejected token {}: {}", redact_token(token), e);
                    outcomes.push(TokenOutcome::failed(token.as_str(), e.provider_message()));
                }
                Err(e) => {
                    error!("FCM send to {} failed: {}", redact_token(token), e);
                    return Err(e);
                }
            }
        }

        Ok(outcomes)
    }

    async fn subscribe_topic(&self, tokens: &[String], topic: &str) -> ProviderResult<TopicReport> {
        self.manage_topic("batchAdd", tokens, topic).await
    }

    async fn unsubscribe_topic(
        &self,
        tokens: &[String],
        topic: &str,
    ) -> ProviderResult<TopicReport> {
        self.manage_topic("batchRemove", tokens, topic).await
    }
}
