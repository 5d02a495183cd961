//! JSON export options shared by [`Content`](super::Content) and
//! [`Author`](super::Author).

use serde::Serialize;
use serde_json::Value as JsonValue;

/// Controls which keys end up in a JSON export.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JsonOptions {
    /// Keys to leave out.
    pub exclude: Vec<String>,
    /// Leave out keys whose value is null, empty, or false.
    pub exclude_empty: bool,
}

impl JsonOptions {
    pub fn exclude<I, S>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(keys.into_iter().map(Into::into));
        self
    }

    pub fn exclude_empty(mut self, exclude_empty: bool) -> Self {
        self.exclude_empty = exclude_empty;
        self
    }

    /// Whether `key` with `value` belongs in the export.
    pub(crate) fn keeps(&self, key: &str, value: &JsonValue) -> bool {
        if self.exclude.iter().any(|k| k == key) {
            return false;
        }
        !(self.exclude_empty && is_blank(value))
    }
}

pub(crate) fn to_json_value<T: Serialize>(value: &T) -> JsonValue {
    serde_json::to_value(value).unwrap_or(JsonValue::Null)
}

fn is_blank(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => true,
        JsonValue::Bool(b) => !b,
        JsonValue::String(s) => s.trim().is_empty(),
        JsonValue::Array(items) => items.is_empty(),
        JsonValue::Object(map) => map.is_empty(),
        JsonValue::Number(_) => false,
    }
}
