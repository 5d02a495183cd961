//! Coercion of loosely-typed metadata values.
//!
//! Metadata decoded from a front matter block arrives as a
//! [`serde_yaml::Value`]. The helpers here turn such values into the strings,
//! lists and maps that the content model stores, applying the same rules at
//! every call site.

pub mod coerce;
pub mod metadata;

pub use coerce::{FlatListOptions, to_flat_list, to_string_or_empty};
pub use metadata::MetadataMap;
pub use serde_yaml::Value;
