use crate::{Document, JsonStore, Result as StoreResult};

use pr_core::TenantKey;

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use log::{debug, info};

/// Default notification icon per tenant, read once at startup
#[derive(Debug, Clone, Default)]
pub struct IconStore {
    icons: BTreeMap<TenantKey, String>,
    root: PathBuf,
}

impl IconStore {
    pub fn load(store: &JsonStore) -> StoreResult<Self> {
        let icons: BTreeMap<TenantKey, String> = store.load(Document::Icons)?;
        info!("Loaded {} tenant icons", icons.len());

        Ok(Self::new(icons, store.root().to_path_buf()))
    }

    /// Build from an in-memory map; relative icon paths resolve against `root`.
    pub fn new(icons: BTreeMap<TenantKey, String>, root: PathBuf) -> Self {
        Self { icons, root }
    }

    /// The tenant's icon, but only when the file actually exists.
    pub fn default_icon(&self, tenant: &TenantKey) -> Option<String> {
        let icon = self.icons.get(tenant)?;
        let path = Path::new(icon);
        let resolved = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };

        if resolved.is_file() {
            Some(icon.clone())
        } else {
            debug!(
                "Icon {} for {} not found on disk, sending without icon",
                resolved.display(),
                tenant
            );
            None
        }
    }
}
