use std::fmt;

use serde_json::{Value as JsonValue, json};
use serde_yaml::Value;
use tracing::debug;

use super::engine::RenderingEngine;
use super::filters::{Filter, FilterContext, FilterRegistry, run_filters};
use super::options::RenderOptions;
use crate::content::Content;
use crate::error::{Error, Result};
use crate::parsing::{ParseOptions, ParsingEngine, PlainText};
use crate::values::{FlatListOptions, MetadataMap, to_flat_list};

/// Renders a content body to HTML through a chain of filters.
///
/// The default pipeline is a list of stages. Each stage names its filter
/// first and the option that switches it off last:
///
/// ```text
/// [[markdown], [table_of_contents, toc], [autolink, links], [emoji], [image_max_width]]
/// ```
pub struct HtmlPipeline {
    default_pipeline: Vec<Vec<String>>,
    default_options: FilterContext,
    filters: FilterRegistry,
    body_engine: Box<dyn ParsingEngine>,
}

impl HtmlPipeline {
    pub const NAME: &'static str = "html_pipeline";

    pub fn new() -> Self {
        Self {
            default_pipeline: default_pipeline(),
            default_options: default_options(),
            filters: FilterRegistry::with_builtins(),
            body_engine: Box::new(PlainText),
        }
    }

    pub fn default_pipeline(&self) -> &[Vec<String>] {
        &self.default_pipeline
    }

    /// Replaces the default pipeline from a loose value.
    ///
    /// Null gives an empty pipeline, a single name a one-stage pipeline, and
    /// each list entry becomes one stage (nested lists are flattened).
    pub fn set_default_pipeline(&mut self, value: &Value) {
        let stages: Vec<Value> = match value {
            Value::Null => Vec::new(),
            Value::Sequence(items) => items.clone(),
            other => vec![other.clone()],
        };
        let options = FlatListOptions { split_commas: false, dedup: true, compact: true };
        self.default_pipeline = stages
            .iter()
            .map(|stage| to_flat_list(stage, options))
            .filter(|stage| !stage.is_empty())
            .collect();
    }

    pub fn with_default_pipeline(mut self, value: &Value) -> Self {
        self.set_default_pipeline(value);
        self
    }

    pub fn default_options(&self) -> &FilterContext {
        &self.default_options
    }

    /// Replaces the default filter options. Anything but a mapping clears them.
    pub fn set_default_options(&mut self, value: &Value) {
        self.default_options = options_from_value(value);
    }

    /// Adds `value`'s entries on top of the current default options.
    pub fn merge_default_options(&mut self, value: &Value) {
        self.default_options.extend(options_from_value(value));
    }

    pub fn with_default_options(mut self, value: &Value) -> Self {
        self.set_default_options(value);
        self
    }

    pub fn filters(&self) -> &FilterRegistry {
        &self.filters
    }

    /// Where custom filters are registered.
    pub fn filters_mut(&mut self) -> &mut FilterRegistry {
        &mut self.filters
    }

    /// Uses another engine to extract the locale-filtered body.
    pub fn with_body_engine(mut self, engine: Box<dyn ParsingEngine>) -> Self {
        self.body_engine = engine;
        self
    }

    /// The filters a render with `options` runs, in order.
    pub fn resolve_pipeline(&self, options: &RenderOptions) -> Vec<String> {
        let mut pipeline = options.pipeline.clone().unwrap_or_else(|| {
            self.default_pipeline.iter().filter_map(|stage| stage.first().cloned()).collect()
        });

        for stage in &self.default_pipeline {
            if let (Some(filter), Some(toggle)) = (stage.first(), stage.last()) {
                if !options.enabled(toggle) {
                    pipeline.retain(|name| name != filter);
                }
            }
        }

        pipeline
    }

    /// Default options, then per-call pipeline options, then the context.
    pub fn filter_context(&self, options: &RenderOptions, context: &FilterContext) -> FilterContext {
        let mut merged = self.default_options.clone();
        merged.extend(options.pipeline_options.clone());
        merged.extend(context.clone());
        merged
    }

    fn body(&self, content: &Content, options: &RenderOptions) -> Result<String> {
        let parse_options =
            ParseOptions { content_tags: options.content_tags.clone(), ..ParseOptions::default() };

        match self.body_engine.filter_content(content, &options.locales, &parse_options) {
            Ok(body) => Ok(body),
            Err(e @ Error::UnavailableLocalization(_)) => Err(e),
            Err(e) => Err(Error::Rendering(e.to_string())),
        }
    }
}

impl Default for HtmlPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for HtmlPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HtmlPipeline")
            .field("default_pipeline", &self.default_pipeline)
            .field("default_options", &self.default_options)
            .field("filters", &self.filters)
            .field("body_engine", &self.body_engine.name())
            .finish()
    }
}

impl RenderingEngine for HtmlPipeline {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn render(
        &self,
        content: &Content,
        options: &RenderOptions,
        context: &FilterContext,
    ) -> Result<String> {
        let pipeline = self.resolve_pipeline(options);
        let filter_context = self.filter_context(options, context);
        let body = self.body(content, options)?;

        let filters = pipeline
            .iter()
            .map(|name| self.filters.get(name))
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| Error::Rendering(e.to_string()))?;
        let filters: Vec<&dyn Filter> = filters.iter().map(|f| f.as_ref()).collect();

        debug!(filters = ?pipeline, "running html pipeline");
        run_filters(&filters, &body, &filter_context).map_err(|e| Error::Rendering(e.to_string()))
    }
}

fn default_pipeline() -> Vec<Vec<String>> {
    [
        &["markdown"][..],
        &["table_of_contents", "toc"],
        &["autolink", "links"],
        &["emoji"],
        &["image_max_width"],
    ]
    .iter()
    .map(|stage| stage.iter().map(|s| s.to_string()).collect())
    .collect()
}

fn options_from_value(value: &Value) -> FilterContext {
    if !value.is_mapping() {
        return FilterContext::new();
    }
    match serde_json::to_value(MetadataMap::from_value(value)) {
        Ok(JsonValue::Object(map)) => map,
        _ => FilterContext::new(),
    }
}

fn default_options() -> FilterContext {
    let mut options = FilterContext::new();
    options.insert("gfm".into(), json!(true));
    options.insert("asset_root".into(), json!("/"));
    options
}
