use std::collections::BTreeMap;

use serde_json::Value as JsonValue;

use super::filters::FilterContext;
use crate::locales::IntoLocales;
use crate::scanner::TagPair;

/// Per-call rendering options.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RenderOptions {
    /// Name of the rendering engine to use; the configured one when unset.
    pub engine: Option<String>,
    /// Locales to render the body for; the default locale when empty.
    pub locales: Vec<String>,
    /// Filters to run, replacing the engine's default pipeline.
    pub pipeline: Option<Vec<String>>,
    /// Stage switches keyed by the stage's toggle name (`toc`, `links`, ...).
    /// A `false` entry removes that stage's filter.
    pub toggles: BTreeMap<String, bool>,
    /// Options merged over the engine defaults for every filter.
    pub pipeline_options: FilterContext,
    /// Markers of locale sections in the body.
    pub content_tags: Option<TagPair>,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn engine(mut self, engine: impl Into<String>) -> Self {
        self.engine = Some(engine.into());
        self
    }

    pub fn locales(mut self, locales: impl IntoLocales) -> Self {
        self.locales = locales.into_locales();
        self
    }

    pub fn pipeline<I, S>(mut self, filters: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.pipeline = Some(filters.into_iter().map(Into::into).collect());
        self
    }

    pub fn toggle(mut self, name: impl Into<String>, enabled: bool) -> Self {
        self.toggles.insert(name.into(), enabled);
        self
    }

    /// Shorthand for `toggle(name, false)`.
    pub fn disable(self, name: impl Into<String>) -> Self {
        self.toggle(name, false)
    }

    pub fn pipeline_option(mut self, key: impl Into<String>, value: JsonValue) -> Self {
        self.pipeline_options.insert(key.into(), value);
        self
    }

    pub fn content_tags(mut self, tags: TagPair) -> Self {
        self.content_tags = Some(tags);
        self
    }

    /// Whether the stage toggled by `name` is on (the default).
    pub fn enabled(&self, name: &str) -> bool {
        self.toggles.get(name).copied().unwrap_or(true)
    }
}
