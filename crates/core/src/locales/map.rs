use serde::ser::{Serialize, SerializeMap, Serializer};

/// An insertion-ordered map from locale key to value.
///
/// Keys are stored as written, so a stored key may be compound (`"it,es"`).
/// Readers that care about individual locales split keys with
/// [`split_compound_key`](super::split_compound_key).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> Default for LocaleMap<T> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<T> LocaleMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a value, replacing in place any entry with the same key.
    pub fn insert(&mut self, key: impl Into<String>, value: T) -> Option<T> {
        let key = key.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => Some(std::mem::replace(slot, value)),
            None => {
                self.entries.push((key, value));
                None
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consumes a single-entry map and returns its value, or gives the map
    /// back untouched.
    pub(crate) fn into_single(mut self) -> Result<T, Self> {
        if self.entries.len() == 1 {
            if let Some((_, value)) = self.entries.pop() {
                return Ok(value);
            }
        }
        Err(self)
    }
}

impl<K: Into<String>, T> FromIterator<(K, T)> for LocaleMap<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<T: Serialize> Serialize for LocaleMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
