//! HTML filters run, in order, by the [`HtmlPipeline`](super::HtmlPipeline).
//!
//! A run first lets every filter adjust the comrak [`Options`], then parses
//! the body once, lets every filter rewrite the document tree and finally
//! formats the tree as HTML. All filters share one option map (the
//! [`FilterContext`]).

pub mod autolink;
pub mod emoji;
pub mod image_max_width;
pub mod markdown;
pub mod toc;

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use comrak::nodes::{AstNode, NodeHtmlBlock, NodeValue};
use comrak::{Arena, Options, format_html, parse_document};
use serde_json::Value as JsonValue;
use thiserror::Error;

use crate::registry::normalize_name;

pub use autolink::Autolink;
pub use emoji::Emoji;
pub use image_max_width::ImageMaxWidth;
pub use markdown::Markdown;
pub use toc::TableOfContents;

/// Options handed to every filter of a pipeline run.
pub type FilterContext = serde_json::Map<String, JsonValue>;

/// Errors that a single filter can raise.
#[derive(Debug, Error)]
pub enum FilterError {
    #[error("unknown filter: {0}")]
    Unknown(String),

    #[error("filter '{filter}': option '{option}' {problem}")]
    InvalidOption { filter: &'static str, option: &'static str, problem: String },

    #[error("filter '{filter}' failed: {message}")]
    Failed { filter: String, message: String },
}

/// One step of the HTML pipeline.
pub trait Filter: Send + Sync {
    fn name(&self) -> &'static str;

    /// Whether the body is markdown once this filter is part of the run.
    /// Without such a filter the body is kept as a raw HTML block.
    fn parses_markdown(&self) -> bool {
        false
    }

    /// Adjusts the options the body is parsed and formatted with.
    fn configure(&self, _options: &mut Options<'_>, _context: &FilterContext) -> Result<(), FilterError> {
        Ok(())
    }

    /// Rewrites the parsed document in place.
    fn transform<'a>(
        &self,
        _arena: &'a Arena<AstNode<'a>>,
        _root: &'a AstNode<'a>,
        _context: &FilterContext,
    ) -> Result<(), FilterError> {
        Ok(())
    }
}

/// Runs `filters` over `input` and returns the formatted HTML.
pub fn run_filters(
    filters: &[&dyn Filter],
    input: &str,
    context: &FilterContext,
) -> Result<String, FilterError> {
    let mut options = Options::default();
    options.render.unsafe_ = true;
    for filter in filters {
        filter.configure(&mut options, context)?;
    }

    let arena = Arena::new();
    let root = if filters.iter().any(|f| f.parses_markdown()) {
        parse_document(&arena, &input.replace('\r', ""), &options)
    } else {
        raw_document(&arena, input)
    };

    for filter in filters {
        filter.transform(&arena, root, context)?;
    }

    let mut html = Vec::with_capacity(input.len());
    format_html(root, &options, &mut html).map_err(|e| failed("html", e))?;
    String::from_utf8(html).map_err(|e| failed("html", e))
}

/// A document holding `html` as a single raw block.
fn raw_document<'a>(arena: &'a Arena<AstNode<'a>>, html: &str) -> &'a AstNode<'a> {
    let root = arena.alloc(AstNode::from(NodeValue::Document));
    let block = NodeHtmlBlock { block_type: 0, literal: html.to_string() };
    root.append(arena.alloc(AstNode::from(NodeValue::HtmlBlock(block))));
    root
}

/// Allocates an inline raw HTML node.
pub(crate) fn html_inline<'a>(arena: &'a Arena<AstNode<'a>>, html: String) -> &'a AstNode<'a> {
    arena.alloc(AstNode::from(NodeValue::HtmlInline(html)))
}

pub(crate) fn failed(filter: &str, error: impl fmt::Display) -> FilterError {
    FilterError::Failed { filter: filter.to_string(), message: error.to_string() }
}

/// Filters by normalized name.
#[derive(Clone, Default)]
pub struct FilterRegistry {
    filters: HashMap<String, Arc<dyn Filter>>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(Markdown);
        registry.register(TableOfContents);
        registry.register(Autolink);
        registry.register(Emoji);
        registry.register(ImageMaxWidth);
        registry
    }

    /// Registers a filter under its own name, replacing any previous one.
    pub fn register(&mut self, filter: impl Filter + 'static) {
        self.filters.insert(normalize_name(filter.name()), Arc::new(filter));
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn Filter>, FilterError> {
        self.filters
            .get(&normalize_name(name))
            .cloned()
            .ok_or_else(|| FilterError::Unknown(name.to_string()))
    }

    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.filters.keys().cloned().collect();
        names.sort();
        names
    }
}

impl fmt::Debug for FilterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterRegistry").field("filters", &self.names()).finish()
    }
}

/// Reads a boolean option; missing or null gives `default`.
pub(crate) fn bool_option(
    context: &FilterContext,
    filter: &'static str,
    option: &'static str,
    default: bool,
) -> Result<bool, FilterError> {
    match context.get(option) {
        None | Some(JsonValue::Null) => Ok(default),
        Some(JsonValue::Bool(b)) => Ok(*b),
        Some(other) => Err(FilterError::InvalidOption {
            filter,
            option,
            problem: format!("must be a boolean, got {other}"),
        }),
    }
}

/// Reads a string option; missing or null gives `default`.
pub(crate) fn str_option<'c>(
    context: &'c FilterContext,
    filter: &'static str,
    option: &'static str,
    default: &'c str,
) -> Result<&'c str, FilterError> {
    match context.get(option) {
        None | Some(JsonValue::Null) => Ok(default),
        Some(JsonValue::String(s)) => Ok(s),
        Some(other) => Err(FilterError::InvalidOption {
            filter,
            option,
            problem: format!("must be a string, got {other}"),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn builtins_are_registered_by_name() {
        let registry = FilterRegistry::with_builtins();
        assert_eq!(
            registry.names(),
            ["autolink", "emoji", "image_max_width", "markdown", "table_of_contents"]
        );
        assert_eq!(registry.get("TableOfContents").unwrap().name(), "table_of_contents");
        assert!(matches!(registry.get("kramdown"), Err(FilterError::Unknown(name)) if name == "kramdown"));
    }

    #[test]
    fn typed_options() {
        let context = json!({ "gfm": false, "asset_root": 1 });
        let context = context.as_object().unwrap();

        assert!(!bool_option(context, "markdown", "gfm", true).unwrap());
        assert!(bool_option(context, "markdown", "missing", true).unwrap());
        assert!(str_option(context, "emoji", "asset_root", "/").is_err());
    }
}
