use rand::Rng;
use rand::distr::Alphanumeric;

pub const API_KEY_LENGTH: usize = 32;
pub const API_SECRET_LENGTH: usize = 48;

/// Uniformly random string over `[A-Za-z0-9]` from the thread-local CSPRNG.
pub fn generate_alphanumeric(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}
