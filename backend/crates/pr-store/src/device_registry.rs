//! Per-tenant, per-user device token registry.
//!
//! Every mutation runs under the write lock and rewrites `tokens.json`
//! before the lock is released, so concurrent requests can't interleave a
//! read-modify-write or race on the file.

use crate::{Document, JsonStore, Result as StoreResult, StoreError};

use pr_core::{TenantKey, redact_token};

use std::collections::BTreeMap;
use std::panic::Location;
use std::sync::Arc;

use error_location::ErrorLocation;
use log::{debug, error, info, warn};
use tokio::sync::RwLock;

/// On-disk shape: tenant key → user id → tokens in insertion order
pub type RegistryDocument = BTreeMap<TenantKey, BTreeMap<String, Vec<String>>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddOutcome {
    Added,
    Duplicate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemoveOutcome {
    Removed,
    NotFound,
}

#[derive(Clone)]
pub struct DeviceRegistry {
    inner: Arc<RwLock<RegistryDocument>>,
    store: JsonStore,
}

impl DeviceRegistry {
    pub fn load(store: JsonStore) -> StoreResult<Self> {
        let mut registry: RegistryDocument = store.load(Document::DeviceTokens)?;

        // Empty user entries can only come from hand-edited files.
        for users in registry.values_mut() {
            users.retain(|_, tokens| !tokens.is_empty());
        }

        let users: usize = registry.values().map(BTreeMap::len).sum();
        info!(
            "Loaded device registry: {} tenants, {} users",
            registry.len(),
            users
        );

        Ok(Self {
            inner: Arc::new(RwLock::new(registry)),
            store,
        })
    }

    /// Register `token` for the user. Re-adding a known token is a no-op.
    ///
    /// A token whose save fails is taken out again, so a retry adds it anew.
    pub async fn add_token(
        &self,
        tenant: &TenantKey,
        user_id: &str,
        token: &str,
    ) -> StoreResult<AddOutcome> {
        let token = token.trim();
        if token.is_empty() {
            return Err(StoreError::EmptyToken {
                location: ErrorLocation::from(Location::caller()),
            });
        }

        let mut registry = self.inner.write().await;
        let tokens = registry
            .entry(tenant.clone())
            .or_default()
            .entry(user_id.to_string())
            .or_default();

        if tokens.iter().any(|t| t == token) {
            debug!(
                "Duplicate token {} for {}/{}",
                redact_token(token),
                tenant,
                user_id
            );
            return Ok(AddOutcome::Duplicate);
        }

        tokens.push(token.to_string());

        if let Err(e) = self.store.save(Document::DeviceTokens, &*registry) {
            error!("Failed to persist device registry, discarding new token: {}", e);
            Self::remove_from(&mut registry, tenant, user_id, |t| t == token);
            return Err(e);
        }

        info!(
            "Added token {} for {}/{}",
            redact_token(token),
            tenant,
            user_id
        );

        Ok(AddOutcome::Added)
    }

    /// Remove `token` from the user's set. Absence is reported, never an error.
    pub async fn remove_token(
        &self,
        tenant: &TenantKey,
        user_id: &str,
        token: &str,
    ) -> StoreResult<RemoveOutcome> {
        let token = token.trim();
        let mut registry = self.inner.write().await;

        let removed = Self::remove_from(&mut registry, tenant, user_id, |t| t == token);
        if removed == 0 {
            return Ok(RemoveOutcome::NotFound);
        }

        self.store.save(Document::DeviceTokens, &*registry)?;
        info!(
            "Removed token {} for {}/{}",
            redact_token(token),
            tenant,
            user_id
        );

        Ok(RemoveOutcome::Removed)
    }

    /// Tokens registered for the user, or `None` when there are none.
    pub async fn lookup(&self, tenant: &TenantKey, user_id: &str) -> Option<Vec<String>> {
        let registry = self.inner.read().await;

        registry
            .get(tenant)
            .and_then(|users| users.get(user_id))
            .filter(|tokens| !tokens.is_empty())
            .cloned()
    }

    /// Drop tokens the provider rejected. Returns how many were removed.
    ///
    /// Only the named tokens are removed from the *current* set, so tokens
    /// registered while a send was in flight survive.
    pub async fn prune(
        &self,
        tenant: &TenantKey,
        user_id: &str,
        failed_tokens: &[String],
    ) -> StoreResult<usize> {
        if failed_tokens.is_empty() {
            return Ok(0);
        }

        let mut registry = self.inner.write().await;
        let removed = Self::remove_from(&mut registry, tenant, user_id, |t| {
            failed_tokens.iter().any(|failed| failed == t)
        });

        if removed > 0 {
            self.store.save(Document::DeviceTokens, &*registry)?;
            warn!(
                "Pruned {} invalid token(s) for {}/{}",
                removed, tenant, user_id
            );
        }

        Ok(removed)
    }

    /// Tenants with at least one registered user
    pub async fn tenant_count(&self) -> usize {
        self.inner
            .read()
            .await
            .values()
            .filter(|users| !users.is_empty())
            .count()
    }

    /// Remove matching tokens; drops the user entry once it is empty.
    fn remove_from<F>(
        registry: &mut RegistryDocument,
        tenant: &TenantKey,
        user_id: &str,
        mut matches: F,
    ) -> usize
    where
        F: FnMut(&str) -> bool,
    {
        let Some(users) = registry.get_mut(tenant) else {
            return 0;
        };
        let Some(tokens) = users.get_mut(user_id) else {
            return 0;
        };

        let before = tokens.len();
        tokens.retain(|t| !matches(t.as_str()));
        let removed = before - tokens.len();

        if tokens.is_empty() {
            users.remove(user_id);
        }

        removed
    }
}
