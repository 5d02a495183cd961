//! Locale sections inside a document body.
//!
//! A body can carry sections such as `{{content: it, !en}}...{{/content}}`
//! that are only shown for some locales. [`scan`] turns the body into a tree
//! of [`Segment`]s and [`flatten`] renders that tree back to text for a set of
//! requested locales.

pub mod cursor;
pub mod rule;
pub mod scan;
pub mod segment;
pub mod tags;

pub use cursor::Cursor;
pub use rule::LocaleRule;
pub use scan::scan;
pub use segment::{Segment, flatten};
pub use tags::{TagPair, TagPattern};

/// Scans `input` and keeps only the text visible for `locales`.
pub fn filter_text(input: &str, tags: &TagPattern, locales: &[String]) -> String {
    flatten(&scan(input, tags), locales)
}
