use crate::{Document, JsonStore, Result as StoreResult};

use std::collections::BTreeMap;
use std::sync::Arc;

use log::{error, info};
use tokio::sync::RwLock;

/// API key → API secret, mirrored to `credentials.json`
#[derive(Clone)]
pub struct CredentialStore {
    inner: Arc<RwLock<BTreeMap<String, String>>>,
    store: JsonStore,
}

impl CredentialStore {
    /// Load the credentials document.
    pub fn load(store: JsonStore) -> StoreResult<Self> {
        let credentials: BTreeMap<String, String> = store.load(Document::Credentials)?;
        info!("Loaded {} API credentials", credentials.len());

        Ok(Self {
            inner: Arc::new(RwLock::new(credentials)),
            store,
        })
    }

    /// Store a new key pair and persist.
    ///
    /// If the write fails the pair is removed again, so a key that was never
    /// committed to disk can't authenticate.
    pub async fn insert(&self, api_key: String, api_secret: String) -> StoreResult<()> {
        let mut credentials = self.inner.write().await;
        credentials.insert(api_key.clone(), api_secret);

        if let Err(e) = self.store.save(Document::Credentials, &*credentials) {
            error!("Failed to persist credentials, discarding new key: {}", e);
            credentials.remove(&api_key);
            return Err(e);
        }

        Ok(())
    }

    /// Secret registered for `api_key`, if any
    pub async fn secret_for(&self, api_key: &str) -> Option<String> {
        self.inner.read().await.get(api_key).cloned()
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.inner.read().await.is_empty()
    }
}
