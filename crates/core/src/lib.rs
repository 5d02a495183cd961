//! Parsing and rendering of localized documents.
//!
//! A document is a metadata block followed by a body. Attributes such as the
//! title can be given per locale, and the body can contain sections that are
//! only shown for some locales:
//!
//! ```text
//! {{metadata}}
//! title:
//!   en: Hello
//!   it: Ciao
//! locales: [en, it]
//! {{/metadata}}
//! Shared text.{{content: it}} Solo italiano.{{/content}}
//! ```
//!
//! [`Parser`] is the usual entry point.

pub mod config;
pub mod content;
pub mod error;
pub mod locales;
pub mod parser;
pub mod parsing;
pub mod registry;
pub mod rendering;
pub mod scanner;
pub mod values;

pub use config::{Config, ConfigError, ConfigLoader, ResolvedConfig};
pub use content::{Author, Content, JsonOptions};
pub use error::{EngineKind, Error, Result};
pub use locales::{IntoLocales, LocaleMap, Localized};
pub use parser::Parser;
pub use parsing::{ParseOptions, ParsingEngine, PlainText};
pub use registry::EngineRegistry;
pub use rendering::{FilterContext, HtmlPipeline, RenderOptions, RenderingEngine};
pub use scanner::TagPair;

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
