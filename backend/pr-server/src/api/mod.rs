pub mod credentials;
pub mod error;
pub mod extractors;
pub mod message_response;
pub mod notifications;
pub mod tenant_config;
pub mod tokens;
pub mod topics;
pub mod validation;
