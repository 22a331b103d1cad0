//! Firebase Cloud Messaging (HTTP v1) provider.

mod access_token;
mod payload;
mod provider;
mod service_account;

pub use provider::FcmProvider;
pub use service_account::ServiceAccount;

pub(crate) use access_token::AccessTokenSource;
pub(crate) use payload::{api_error_message, build_message, topic_name};
