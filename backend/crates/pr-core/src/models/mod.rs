pub mod data_payload;
pub mod decoration_rule;
pub mod push_message;
pub mod tenant_key;
