pub mod decoration;
pub mod error;
pub mod models;

pub use decoration::DecorationEngine;
pub use error::{CoreError, Result};
pub use models::data_payload::{CLICK_ACTION_FIELD, parse_data_payload};
pub use models::decoration_rule::{DecorationRule, TITLE_PLACEHOLDER};
pub use models::push_message::{PushMessage, PushTarget};
pub use models::tenant_key::TenantKey;


/// Shorten a device token for log output. Full tokens never reach the logs.
pub fn redact_token(token: &str) -> String {
    const VISIBLE: usize = 8;

    match token.char_indices().nth(VISIBLE) {
        Some((idx, _)) => format!("{}…", &token[..idx]),
        None => token.to_string(),
    }
}
