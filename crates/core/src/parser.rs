//! The entry point tying configuration, engines and contents together.

use std::borrow::Cow;

use serde_yaml::Value;
use tracing::debug;

use crate::config::{Config, ResolvedConfig};
use crate::content::Content;
use crate::error::Result;
use crate::parsing::{ParseOptions, ParsingEngine};
use crate::registry::EngineRegistry;
use crate::rendering::{FilterContext, HtmlPipeline, RenderOptions, RenderingEngine};

/// Parses and renders documents with engines looked up by name.
#[derive(Debug, Clone)]
pub struct Parser {
    config: Config,
    registry: EngineRegistry,
}

impl Parser {
    pub fn new() -> Self {
        Self::with_config(Config::new())
    }

    pub fn with_config(config: Config) -> Self {
        Self { config, registry: EngineRegistry::with_builtins() }
    }

    /// A parser whose `html_pipeline` engine carries the configured pipeline
    /// and filter options.
    pub fn from_resolved(resolved: &ResolvedConfig) -> Self {
        let mut parser = Self::with_config(resolved.config.clone());
        let configured = resolved.clone();
        parser
            .registry
            .register_rendering(HtmlPipeline::NAME, move || Box::new(configured.html_pipeline()));
        parser
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    pub fn registry(&self) -> &EngineRegistry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut EngineRegistry {
        &mut self.registry
    }

    /// Restores the default locale and engine names. Registered engines stay.
    pub fn reset(&mut self) {
        self.config.reset();
    }

    pub fn create_parsing_engine(&self, name: Option<&str>) -> Result<Box<dyn ParsingEngine>> {
        self.registry.create_parsing(name.unwrap_or(self.config.parsing_engine()))
    }

    pub fn create_rendering_engine(&self, name: Option<&str>) -> Result<Box<dyn RenderingEngine>> {
        self.registry.create_rendering(name.unwrap_or(self.config.rendering_engine()))
    }

    /// Parses a raw document. The content's default locale is the parser's.
    pub fn parse(&self, raw: &str, options: &ParseOptions) -> Result<Content> {
        let engine = self.create_parsing_engine(options.engine.as_deref())?;
        debug!(engine = engine.name(), "parsing document");
        let mut content = engine.parse(raw, options)?;
        content.set_default_locale(self.config.locale());
        Ok(content)
    }

    /// Returns the body of `content` restricted to `locales`.
    pub fn body(&self, content: &Content, locales: &[String], options: &ParseOptions) -> Result<String> {
        let engine = self.create_parsing_engine(options.engine.as_deref())?;
        engine.filter_content(content, locales, options)
    }

    /// Renders `content`. Without explicit locales the parser's locale is used.
    pub fn render(
        &self,
        content: &Content,
        options: &RenderOptions,
        context: &FilterContext,
    ) -> Result<String> {
        let engine = self.create_rendering_engine(options.engine.as_deref())?;
        let options = if options.locales.is_empty() {
            let mut filled = options.clone();
            filled.locales = vec![self.config.locale().to_string()];
            Cow::Owned(filled)
        } else {
            Cow::Borrowed(options)
        };

        debug!(engine = engine.name(), locales = ?options.locales, "rendering content");
        engine.render(content, &options, context)
    }

    /// Renders a bare body, without metadata.
    pub fn render_text(
        &self,
        text: &str,
        options: &RenderOptions,
        context: &FilterContext,
    ) -> Result<String> {
        let content =
            Content::create(&Value::Null, text)?.with_default_locale(self.config.locale());
        self.render(&content, options, context)
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}
