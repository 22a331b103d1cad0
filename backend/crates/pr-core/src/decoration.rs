//! Title decoration engine
//!
//! Rewrites notification titles using per-tenant rule sets and per-topic
//! rules. Patterns are compiled once when the engine is built; a pattern that
//! fails to compile is logged and then never matches, so a bad rule can't
//! stop a notification from going out.

use crate::{DecorationRule, TenantKey};

use std::collections::{BTreeMap, HashMap};

use log::{debug, warn};
use regex::Regex;

struct CompiledRule {
    name: String,
    regex: Option<Regex>,
    rule: DecorationRule,
}

impl CompiledRule {
    fn compile(scope: &str, name: String, rule: DecorationRule) -> Self {
        let regex = match Regex::new(&rule.pattern) {
            Ok(regex) => Some(regex),
            Err(e) => {
                warn!(
                    "Decoration rule '{}' for {} has an invalid pattern {:?}, rule disabled: {}",
                    name, scope, rule.pattern, e
                );
                None
            }
        };

        Self { name, regex, rule }
    }

    fn apply(&self, title: &str) -> Option<String> {
        let regex = self.regex.as_ref()?;
        regex.is_match(title).then(|| self.rule.render(title))
    }
}

/// Immutable, shareable set of compiled decoration rules
#[derive(Default)]
pub struct DecorationEngine {
    tenant_rules: HashMap<TenantKey, Vec<CompiledRule>>,
    topic_rules: HashMap<String, CompiledRule>,
}

impl DecorationEngine {
    /// Compile the tenant and topic rule documents.
    ///
    /// Tenant rules are tried in rule-name order.
    // TODO: add an explicit priority to DecorationRule; name order is only a stable
    // stand-in when several patterns match the same title.
    pub fn new(
        tenant_rules: BTreeMap<TenantKey, BTreeMap<String, DecorationRule>>,
        topic_rules: BTreeMap<String, DecorationRule>,
    ) -> Self {
        let tenant_rules = tenant_rules
            .into_iter()
            .map(|(tenant, rules)| {
                let scope = format!("tenant {tenant}");
                let compiled = rules
                    .into_iter()
                    .map(|(name, rule)| CompiledRule::compile(&scope, name, rule))
                    .collect();
                (tenant, compiled)
            })
            .collect();

        let topic_rules = topic_rules
            .into_iter()
            .map(|(topic, rule)| {
                let scope = format!("topic {topic}");
                let compiled = CompiledRule::compile(&scope, topic.clone(), rule);
                (topic, compiled)
            })
            .collect();

        Self {
            tenant_rules,
            topic_rules,
        }
    }

    /// Apply the first matching rule of the tenant's rule set.
    pub fn decorate(&self, tenant: &TenantKey, title: &str) -> String {
        let Some(rules) = self.tenant_rules.get(tenant) else {
            return title.to_string();
        };

        for rule in rules {
            if let Some(decorated) = rule.apply(title) {
                debug!("Title decorated by rule '{}' for {}", rule.name, tenant);
                return decorated;
            }
        }

        title.to_string()
    }

    /// Apply the topic's rule, if it has one and it matches.
    pub fn decorate_topic(&self, topic: &str, title: &str) -> String {
        self.topic_rules
            .get(topic)
            .and_then(|rule| rule.apply(title))
            .unwrap_or_else(|| title.to_string())
    }

    /// Number of rules disabled because their pattern didn't compile
    pub fn disabled_rule_count(&self) -> usize {
        let tenant = self
            .tenant_rules
            .values()
            .flatten()
            .filter(|rule| rule.regex.is_none())
            .count();
        let topic = self
            .topic_rules
            .values()
            .filter(|rule| rule.regex.is_none())
            .count();

        tenant + topic
    }

    pub fn tenant_count(&self) -> usize {
        self.tenant_rules.len()
    }

    pub fn topic_count(&self) -> usize {
        self.topic_rules.len()
    }
}
