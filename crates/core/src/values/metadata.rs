use serde::ser::{Serialize, SerializeMap, Serializer};
use serde_yaml::{Mapping, Value};

use super::coerce::to_string_or_empty;

/// An ordered, string-keyed bag of free-form metadata.
///
/// Keys of nested mappings are stringified recursively when the map is built
/// from a value. Lookups try the exact key first and then fall back to an
/// ASCII case-insensitive match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetadataMap {
    entries: Vec<(String, Value)>,
}

impl MetadataMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a map from a mapping value. Any other value yields an empty map.
    pub fn from_value(value: &Value) -> Self {
        let mut map = Self::new();
        if let Value::Mapping(mapping) = value {
            for (key, value) in mapping {
                map.insert(to_string_or_empty(key), stringify_keys(value));
            }
        }
        map
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.position(key).map(|i| &self.entries[i].1)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.position(key).is_some()
    }

    /// Inserts a value, replacing (in place) an entry with the exact same key.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.position(key).map(|i| self.entries.remove(i).1)
    }

    /// Copies every entry of `other` into this map, overriding existing keys.
    pub fn merge(&mut self, other: MetadataMap) {
        for (key, value) in other.entries {
            self.insert(key, value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_value(&self) -> Value {
        let mut mapping = Mapping::new();
        for (key, value) in &self.entries {
            mapping.insert(Value::String(key.clone()), value.clone());
        }
        Value::Mapping(mapping)
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| k == key)
            .or_else(|| self.entries.iter().position(|(k, _)| k.eq_ignore_ascii_case(key)))
    }
}

impl Serialize for MetadataMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

fn stringify_keys(value: &Value) -> Value {
    match value {
        Value::Mapping(mapping) => Value::Mapping(
            mapping
                .iter()
                .map(|(k, v)| (Value::String(to_string_or_empty(k)), stringify_keys(v)))
                .collect(),
        ),
        Value::Sequence(items) => Value::Sequence(items.iter().map(stringify_keys).collect()),
        other => other.clone(),
    }
}
