//! Start/end markers for metadata blocks and body sections.

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;

use crate::error::{Error, Result};
use crate::values::to_string_or_empty;

/// Placeholder in a start marker where the section's locale rule goes.
pub const ARGS_PLACEHOLDER: &str = "%ARGS%";

/// What the placeholder expands to inside the compiled start pattern.
const ARGS_PATTERN: &str = r"\s*(?P<args>[^\n\}]+,?)*";

pub const DEFAULT_METADATA_START: &str = "{{metadata}}";
pub const DEFAULT_METADATA_END: &str = "{{/metadata}}";
pub const DEFAULT_CONTENT_START: &str = "{{content: %ARGS%}}";
pub const DEFAULT_CONTENT_END: &str = "{{/content}}";

/// A pair of literal markers, as written by the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TagPair {
    pub start: String,
    pub end: String,
}

impl TagPair {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self { start: start.into(), end: end.into() }
    }

    pub fn metadata() -> Self {
        Self::new(DEFAULT_METADATA_START, DEFAULT_METADATA_END)
    }

    pub fn content() -> Self {
        Self::new(DEFAULT_CONTENT_START, DEFAULT_CONTENT_END)
    }

    /// Builds a pair from a list of markers.
    ///
    /// Only the first two non-blank entries are used. A single entry serves as
    /// both start and end (as with `---` front matter). No entries at all
    /// gives `default`.
    pub fn from_list<S: AsRef<str>>(items: &[S], default: TagPair) -> Self {
        let mut markers = items.iter().map(AsRef::as_ref).filter(|s| !s.trim().is_empty());
        match (markers.next(), markers.next()) {
            (Some(start), Some(end)) => Self::new(start, end),
            (Some(only), None) => Self::new(only, only),
            _ => default,
        }
    }

    /// Builds a pair from a loose value: a list of markers or a comma
    /// separated string. Null or blank input gives `default`.
    pub fn from_value(value: &Value, default: TagPair) -> Self {
        match value {
            Value::Null => default,
            Value::Sequence(items) => {
                let items: Vec<String> = items.iter().map(to_string_or_empty).collect();
                Self::from_list(&items, default)
            }
            other => {
                let text = to_string_or_empty(other);
                let items: Vec<&str> = text.split(',').map(str::trim).collect();
                Self::from_list(&items, default)
            }
        }
    }

    /// Compiles the markers into regular expressions.
    pub fn compile(&self) -> Result<TagPattern> {
        Ok(TagPattern {
            start: compile_marker(&self.start)?,
            end: compile_marker(&self.end)?,
        })
    }
}

/// Compiled markers, ready for scanning.
#[derive(Debug, Clone)]
pub struct TagPattern {
    pub start: Regex,
    pub end: Regex,
}

impl TagPattern {
    /// The `args` capture of a start marker match, or `""` when absent.
    pub fn args<'h>(&self, start_match: &'h str) -> &'h str {
        self.start
            .captures(start_match)
            .and_then(|c| c.name("args"))
            .map_or("", |m| m.as_str())
    }
}

fn compile_marker(marker: &str) -> Result<Regex> {
    let pattern = regex::escape(marker).replace(ARGS_PLACEHOLDER, ARGS_PATTERN);
    Regex::new(&pattern).map_err(|e| Error::InvalidTags(format!("{marker}: {e}")))
}
