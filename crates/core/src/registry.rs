//! Name-based lookup of parsing and rendering engines.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use crate::error::{EngineKind, Error, Result};
use crate::parsing::{ParsingEngine, PlainText};
use crate::rendering::{HtmlPipeline, RenderingEngine};

pub type ParsingFactory = Arc<dyn Fn() -> Box<dyn ParsingEngine> + Send + Sync>;
pub type RenderingFactory = Arc<dyn Fn() -> Box<dyn RenderingEngine> + Send + Sync>;

/// Factories for every known engine, keyed by normalized name.
///
/// `PlainText`, `plain-text` and `plain_text` all name the same engine; see
/// [`normalize_name`].
#[derive(Clone, Default)]
pub struct EngineRegistry {
    parsing: HashMap<String, ParsingFactory>,
    rendering: HashMap<String, RenderingFactory>,
}

impl EngineRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry with the bundled `plain_text` and `html_pipeline` engines.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_parsing(PlainText::NAME, || Box::new(PlainText));
        registry.register_rendering(HtmlPipeline::NAME, || Box::new(HtmlPipeline::new()));
        registry
    }

    /// Registers (or replaces) a parsing engine.
    pub fn register_parsing<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn ParsingEngine> + Send + Sync + 'static,
    {
        self.parsing.insert(normalize_name(name), Arc::new(factory));
    }

    /// Registers (or replaces) a rendering engine.
    pub fn register_rendering<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn RenderingEngine> + Send + Sync + 'static,
    {
        self.rendering.insert(normalize_name(name), Arc::new(factory));
    }

    pub fn create_parsing(&self, name: &str) -> Result<Box<dyn ParsingEngine>> {
        let key = normalize_name(name);
        let factory = self.parsing.get(&key).ok_or_else(|| Error::UnknownEngine {
            kind: EngineKind::Parsing,
            name: name.to_string(),
        })?;
        debug!(engine = %key, "parsing engine resolved");
        Ok(factory())
    }

    pub fn create_rendering(&self, name: &str) -> Result<Box<dyn RenderingEngine>> {
        let key = normalize_name(name);
        let factory = self.rendering.get(&key).ok_or_else(|| Error::UnknownEngine {
            kind: EngineKind::Rendering,
            name: name.to_string(),
        })?;
        debug!(engine = %key, "rendering engine resolved");
        Ok(factory())
    }

    pub fn has(&self, kind: EngineKind, name: &str) -> bool {
        let key = normalize_name(name);
        match kind {
            EngineKind::Parsing => self.parsing.contains_key(&key),
            EngineKind::Rendering => self.rendering.contains_key(&key),
        }
    }

    /// Registered names of one kind, sorted.
    pub fn names(&self, kind: EngineKind) -> Vec<String> {
        let mut names: Vec<String> = match kind {
            EngineKind::Parsing => self.parsing.keys().cloned().collect(),
            EngineKind::Rendering => self.rendering.keys().cloned().collect(),
        };
        names.sort();
        names
    }
}

impl fmt::Debug for EngineRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineRegistry")
            .field("parsing", &self.names(EngineKind::Parsing))
            .field("rendering", &self.names(EngineKind::Rendering))
            .finish()
    }
}

/// Normalizes an engine or filter name to `snake_case`.
///
/// CamelCase words are split (`HTMLPipeline` becomes `html_pipeline`), and
/// dashes and spaces become underscores.
pub fn normalize_name(name: &str) -> String {
    let chars: Vec<char> = name.trim().chars().collect();
    let mut out = String::with_capacity(chars.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if c == '-' || c.is_whitespace() {
            out.push('_');
            continue;
        }
        if c.is_uppercase() && i > 0 {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|n| n.is_lowercase());
            if prev.is_lowercase() || prev.is_ascii_digit() || (prev.is_uppercase() && next_is_lower)
            {
                out.push('_');
            }
        }
        out.extend(c.to_lowercase());
    }

    out
}
