pub mod basic_credentials;
pub mod credential_issuer;
pub mod credential_request;
pub mod error;
pub mod key_generator;

pub use basic_credentials::BasicCredentials;
pub use credential_issuer::{CredentialIssuer, WEBHOOK_TIMEOUT};
pub use credential_request::{CredentialRequest, IssuedCredentials};
pub use error::{AuthError, Result};
pub use key_generator::{API_KEY_LENGTH, API_SECRET_LENGTH, generate_alphanumeric};

#[cfg(test)]
mod tests;
