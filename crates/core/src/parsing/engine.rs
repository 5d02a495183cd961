use serde_yaml::Value;

use super::options::ParseOptions;
use crate::content::Content;
use crate::error::{Error, Result};

/// A document format.
///
/// An engine knows how to split a raw document into its metadata block and
/// body, decode the metadata, and restrict a body to a set of locales. Every
/// step defaults to [`Error::Unimplemented`]; [`parse`](Self::parse) chains
/// the first two into a [`Content`].
pub trait ParsingEngine: Send + Sync {
    /// The name the engine is registered under.
    fn name(&self) -> &'static str;

    /// Splits a raw document into `(metadata, body)`.
    fn separate_components(&self, _raw: &str, _options: &ParseOptions) -> Result<(String, String)> {
        Err(Error::Unimplemented("separate_components"))
    }

    /// Decodes a metadata block.
    fn parse_metadata(&self, _text: &str, _options: &ParseOptions) -> Result<Value> {
        Err(Error::Unimplemented("parse_metadata"))
    }

    /// Returns the body of `content` restricted to `locales`.
    fn filter_content(
        &self,
        _content: &Content,
        _locales: &[String],
        _options: &ParseOptions,
    ) -> Result<String> {
        Err(Error::Unimplemented("filter_content"))
    }

    /// Parses a raw document into a [`Content`].
    fn parse(&self, raw: &str, options: &ParseOptions) -> Result<Content> {
        let (metadata, body) = self.separate_components(raw, options)?;

        let metadata =
            if options.metadata { self.parse_metadata(&metadata, options)? } else { Value::Null };
        let body = if options.content { body } else { String::new() };

        Content::create(&metadata, &body)
    }
}
