/// The closed set of documents the store may read or write.
///
/// Each kind maps to one fixed file name inside the data directory, so no
/// caller-supplied string ever becomes part of a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Document {
    /// API key → API secret
    Credentials,
    /// Tenant key → user id → device tokens
    DeviceTokens,
    /// Tenant key → rule name → decoration rule
    Decorations,
    /// Topic name → decoration rule
    TopicDecorations,
    /// Tenant key → default icon path
    Icons,
}

impl Document {
    pub const ALL: [Document; 5] = [
        Document::Credentials,
        Document::DeviceTokens,
        Document::Decorations,
        Document::TopicDecorations,
        Document::Icons,
    ];

    pub fn file_name(self) -> &'static str {
        match self {
            Document::Credentials => "credentials.json",
            Document::DeviceTokens => "tokens.json",
            Document::Decorations => "decorations.json",
            Document::TopicDecorations => "topic_decorations.json",
            Document::Icons => "icons.json",
        }
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.file_name())
    }
}
