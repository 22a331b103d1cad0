pub mod credential_store;
pub mod decoration_loader;
pub mod device_registry;
pub mod document;
pub mod error;
pub mod icon_store;
pub mod json_store;

pub use credential_store::CredentialStore;
pub use decoration_loader::{TenantRuleDocument, TopicRuleDocument, load_decoration_engine};
pub use device_registry::{AddOutcome, DeviceRegistry, RegistryDocument, RemoveOutcome};
pub use document::Document;
pub use error::{Result, StoreError};
pub use icon_store::IconStore;
pub use json_store::JsonStore;

#[cfg(test)]
mod tests;
