use std::path::PathBuf;

use serde::Deserialize;
use serde_yaml::Value;

use crate::content::DEFAULT_LOCALE;
use crate::parsing::ParseOptions;
use crate::rendering::{HtmlPipeline, RenderOptions};
use crate::scanner::TagPair;

pub const DEFAULT_PARSING_ENGINE: &str = "plain_text";
pub const DEFAULT_RENDERING_ENGINE: &str = "html_pipeline";

/// Runtime defaults for a [`Parser`](crate::Parser).
///
/// Every setter takes an optional value; `None` or a blank string restores
/// the built-in default.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    locale: String,
    parsing_engine: String,
    rendering_engine: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            locale: DEFAULT_LOCALE.to_string(),
            parsing_engine: DEFAULT_PARSING_ENGINE.to_string(),
            rendering_engine: DEFAULT_RENDERING_ENGINE.to_string(),
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn parsing_engine(&self) -> &str {
        &self.parsing_engine
    }

    pub fn rendering_engine(&self) -> &str {
        &self.rendering_engine
    }

    pub fn set_locale(&mut self, locale: Option<&str>) {
        self.locale = or_default(locale, DEFAULT_LOCALE);
    }

    pub fn set_parsing_engine(&mut self, name: Option<&str>) {
        self.parsing_engine = or_default(name, DEFAULT_PARSING_ENGINE);
    }

    pub fn set_rendering_engine(&mut self, name: Option<&str>) {
        self.rendering_engine = or_default(name, DEFAULT_RENDERING_ENGINE);
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

fn or_default(value: Option<&str>, default: &str) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => default.to_string(),
    }
}

/// On-disk layout of `config.toml`.
#[derive(Debug, Deserialize)]
pub struct ConfigFile {
    pub version: u32,
    pub locale: Option<String>,
    pub parsing_engine: Option<String>,
    pub rendering_engine: Option<String>,
    #[serde(default)]
    pub tags: TagsConfig,
    #[serde(default)]
    pub render: RenderConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Markers as a two-element list or a comma separated string.
#[derive(Debug, Deserialize, Default, Clone)]
pub struct TagsConfig {
    #[serde(default)]
    pub metadata: Option<Value>,
    #[serde(default)]
    pub content: Option<Value>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct RenderConfig {
    /// Stages in the loose form accepted by [`HtmlPipeline::set_default_pipeline`].
    #[serde(default)]
    pub pipeline: Option<Value>,
    #[serde(default)]
    pub options: Option<Value>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub file_level: Option<String>,
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: default_log_level(), file_level: None, file: None }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// A loaded config file with defaults filled in and paths expanded.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The file the values came from, if any was found.
    pub source: Option<PathBuf>,
    pub config: Config,
    pub metadata_tags: TagPair,
    pub content_tags: TagPair,
    pub pipeline: Option<Value>,
    pub pipeline_options: Option<Value>,
    pub logging: LoggingConfig,
}

impl ResolvedConfig {
    pub fn parse_options(&self) -> ParseOptions {
        ParseOptions::new()
            .meta_tags(self.metadata_tags.clone())
            .content_tags(self.content_tags.clone())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new().content_tags(self.content_tags.clone())
    }

    /// An HTML engine carrying the configured pipeline and filter options.
    pub fn html_pipeline(&self) -> HtmlPipeline {
        let mut engine = HtmlPipeline::new();
        if let Some(pipeline) = &self.pipeline {
            engine.set_default_pipeline(pipeline);
        }
        if let Some(options) = &self.pipeline_options {
            engine.merge_default_options(options);
        }
        engine
    }
}

impl Default for ResolvedConfig {
    fn default() -> Self {
        Self {
            source: None,
            config: Config::new(),
            metadata_tags: TagPair::metadata(),
            content_tags: TagPair::content(),
            pipeline: None,
            pipeline_options: None,
            logging: LoggingConfig::default(),
        }
    }
}
