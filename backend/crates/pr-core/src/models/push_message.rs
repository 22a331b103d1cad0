use std::collections::BTreeMap;

use serde::Serialize;

/// Where a single provider `send` is addressed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PushTarget {
    Token(String),
    Topic(String),
}

/// Provider-neutral notification content.
///
/// Built by the dispatcher after icon resolution and decoration; the
/// provider decides how each field maps onto its wire format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PushMessage {
    pub title: String,
    pub body: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Opened when the notification is clicked (from `click_action`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub data: BTreeMap<String, String>,
}
