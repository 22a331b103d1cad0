use crate::{Document, JsonStore, Result as StoreResult};

use pr_core::{DecorationEngine, DecorationRule, TenantKey};

use std::collections::BTreeMap;

use log::{info, warn};

/// `decorations.json`: tenant key → rule name → rule
pub type TenantRuleDocument = BTreeMap<TenantKey, BTreeMap<String, DecorationRule>>;

/// `topic_decorations.json`: topic name → rule
pub type TopicRuleDocument = BTreeMap<String, DecorationRule>;

/// Load both decoration documents and compile them.
///
/// Rules with invalid patterns are reported here, at load time, and stay
/// disabled for the life of the process.
pub fn load_decoration_engine(store: &JsonStore) -> StoreResult<DecorationEngine> {
    let tenant_rules: TenantRuleDocument = store.load(Document::Decorations)?;
    let topic_rules: TopicRuleDocument = store.load(Document::TopicDecorations)?;

    let engine = DecorationEngine::new(tenant_rules, topic_rules);

    info!(
        "Loaded decoration rules: {} tenants, {} topics",
        engine.tenant_count(),
        engine.topic_count()
    );

    let disabled = engine.disabled_rule_count();
    if disabled > 0 {
        warn!("{} decoration rule(s) disabled due to invalid patterns", disabled);
    }

    Ok(engine)
}
