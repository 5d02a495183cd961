use serde_yaml::Value;

use crate::scanner::TagPair;

/// Per-call parsing options.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Name of the parsing engine to use; the configured one when unset.
    pub engine: Option<String>,
    /// Markers around the metadata block.
    pub meta_tags: Option<TagPair>,
    /// Markers around locale sections of the body.
    pub content_tags: Option<TagPair>,
    /// Decode the metadata block. When false the content gets no metadata.
    pub metadata: bool,
    /// Keep the body. When false the content body is empty.
    pub content: bool,
    /// Metadata to use when the block cannot be decoded.
    pub default: Option<Value>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            engine: None,
            meta_tags: None,
            content_tags: None,
            metadata: true,
            content: true,
            default: None,
        }
    }
}

impl ParseOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    pub fn meta_tags(mut self, tags: TagPair) -> Self {
        self.meta_tags = Some(tags);
        self
    }

    pub fn content_tags(mut self, tags: TagPair) -> Self {
        self.content_tags = Some(tags);
        self
    }

    pub fn metadata(mut self, enabled: bool) -> Self {
        self.metadata = enabled;
        self
    }

    pub fn content(mut self, enabled: bool) -> Self {
        self.content = enabled;
        self
    }

    pub fn default_metadata(mut self, default: Value) -> Self {
        self.default = Some(default);
        self
    }

    /// The metadata markers, or the built-in ones.
    pub fn meta_tag_pair(&self) -> TagPair {
        self.meta_tags.clone().unwrap_or_else(TagPair::metadata)
    }

    /// The section markers, or the built-in ones.
    pub fn content_tag_pair(&self) -> TagPair {
        self.content_tags.clone().unwrap_or_else(TagPair::content)
    }
}
