use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct CredentialResponse {
    pub success: bool,
    pub credentials: CredentialPair,
}

#[derive(Debug, Serialize)]
pub struct CredentialPair {
    pub api_key: String,
    pub api_secret: String,
}
