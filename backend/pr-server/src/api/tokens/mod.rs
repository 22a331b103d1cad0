pub mod token_request;
pub mod tokens;
