pub mod credential_response;
pub mod credentials;
pub mod get_credential_request;
