use crate::error::Result as ServerErrorResult;

use pr_auth::CredentialIssuer;
use pr_config::TenantConfig;
use pr_push::{Dispatcher, PushProvider};
use pr_store::{CredentialStore, DeviceRegistry, IconStore, JsonStore, load_decoration_engine};

use std::collections::BTreeMap;
use std::sync::Arc;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub credentials: CredentialStore,
    pub issuer: CredentialIssuer,
    pub registry: DeviceRegistry,
    pub dispatcher: Dispatcher,
    /// Keyed by tenant key
    pub tenants: Arc<BTreeMap<String, TenantConfig>>,
    /// False when the push provider failed to initialize
    pub provider_ready: bool,
}

impl AppState {
    /// Load every document from `store` and wire up the services.
    pub fn load(
        store: &JsonStore,
        provider: Arc<dyn PushProvider>,
        provider_ready: bool,
        tenants: BTreeMap<String, TenantConfig>,
    ) -> ServerErrorResult<Self> {
        let credentials = CredentialStore::load(store.clone())?;
        let registry = DeviceRegistry::load(store.clone())?;
        let decorations = load_decoration_engine(store)?;
        let icons = IconStore::load(store)?;

        let issuer = CredentialIssuer::new(credentials.clone())?;
        let dispatcher = Dispatcher::new(
            registry.clone(),
            Arc::new(decorations),
            Arc::new(icons),
            provider,
        );

        Ok(Self {
            credentials,
            issuer,
            registry,
            dispatcher,
            tenants: Arc::new(tenants),
            provider_ready,
        })
    }
}
