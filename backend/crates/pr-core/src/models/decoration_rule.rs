use serde::{Deserialize, Serialize};

/// Placeholder in a template that receives the original title
pub const TITLE_PLACEHOLDER: &str = "{title}";

/// A title rewrite rule as stored in the decoration documents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecorationRule {
    /// Regular expression searched (not full-matched) against the title
    pub pattern: String,
    /// Replacement text; the first `{title}` is substituted
    pub template: String,
}

impl DecorationRule {
    pub fn new<P: Into<String>, T: Into<String>>(pattern: P, template: T) -> Self {
        Self {
            pattern: pattern.into(),
            template: template.into(),
        }
    }

    /// Render the template around `title`. Only the first placeholder is replaced.
    pub fn render(&self, title: &str) -> String {
        self.template.replacen(TITLE_PLACEHOLDER, title, 1)
    }
}
