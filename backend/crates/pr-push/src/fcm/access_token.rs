//! OAuth2 access tokens for the service account (JWT bearer grant).

use crate::{ProviderError, ProviderResult, ServiceAccount};

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use log::debug;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

const FCM_SCOPE: &str = "https://www.googleapis.com/auth/firebase.messaging";
const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";

/// Lifetime requested for the signed assertion
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// Refresh this long before the access token actually expires
const REFRESH_MARGIN_SECS: i64 = 60;

#[derive(Debug, Serialize)]
struct GrantClaims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_expires_in")]
    expires_in: i64,
}

fn default_expires_in() -> i64 {
    ASSERTION_LIFETIME_SECS
}

struct CachedToken {
    token: String,
    /// Unix timestamp after which the token is refreshed
    refresh_at: i64,
}

pub(crate) struct AccessTokenSource {
    account: ServiceAccount,
    encoding_key: EncodingKey,
    client: reqwest::Client,
    cached: Mutex<Option<CachedToken>>,
}

impl AccessTokenSource {
    #[track_caller]
    pub(crate) fn new(account: ServiceAccount, client: reqwest::Client) -> ProviderResult<Self> {
        let encoding_key = EncodingKey::from_rsa_pem(account.private_key.as_bytes())
            .map_err(|e| ProviderError::init(format!("invalid service account private key: {e}")))?;

        Ok(Self {
            account,
            encoding_key,
            client,
            cached: Mutex::new(None),
        })
    }

    /// A valid access token, fetching a new one when the cached token is stale.
    pub(crate) async fn token(&self) -> ProviderResult<String> {
        // Held across the fetch so concurrent sends share one refresh.
        let mut cached = self.cached.lock().await;

        if let Some(token) = cached.as_ref()
            && token.refresh_at > Utc::now().timestamp()
        {
            return Ok(token.token.clone());
        }

        let fresh = self.fetch().await?;
        let token = fresh.token.clone();
        *cached = Some(fresh);

        Ok(token)
    }

    async fn fetch(&self) -> ProviderResult<CachedToken> {
        let assertion = self.sign_assertion()?;

        let response = self
            .client
            .post(&self.account.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::auth(format!(
                "token endpoint returned {status}: {body}"
            )));
        }

        let grant: TokenResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::auth(format!("unreadable token response: {e}")))?;

        debug!("Obtained FCM access token valid for {}s", grant.expires_in);

        Ok(CachedToken {
            token: grant.access_token,
            refresh_at: Utc::now().timestamp() + grant.expires_in - REFRESH_MARGIN_SECS,
        })
    }

    fn sign_assertion(&self) -> ProviderResult<String> {
        let iat = Utc::now().timestamp();
        let claims = GrantClaims {
            iss: &self.account.client_email,
            scope: FCM_SCOPE,
            aud: &self.account.token_uri,
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.account.private_key_id.clone();

        jsonwebtoken::encode(&header, &claims, &self.encoding_key)
            .map_err(|e| ProviderError::auth(format!("failed to sign token request: {e}")))
    }
}
