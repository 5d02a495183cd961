use serde::{Serialize, Serializer};

use super::map::LocaleMap;
use super::normalize::{WILDCARD, split_compound_key};

/// A content attribute that is either a single value or one value per locale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Localized<T> {
    /// The same value for every locale.
    Plain(T),
    /// Values keyed by (possibly compound) locale keys.
    ByLocale(LocaleMap<T>),
}

impl<T: Default> Default for Localized<T> {
    fn default() -> Self {
        Localized::Plain(T::default())
    }
}

impl<T> Localized<T> {
    pub fn as_plain(&self) -> Option<&T> {
        match self {
            Localized::Plain(value) => Some(value),
            Localized::ByLocale(_) => None,
        }
    }

    pub fn as_map(&self) -> Option<&LocaleMap<T>> {
        match self {
            Localized::Plain(_) => None,
            Localized::ByLocale(map) => Some(map),
        }
    }

    pub fn is_localized(&self) -> bool {
        matches!(self, Localized::ByLocale(_))
    }
}

impl<T: Clone> Localized<T> {
    /// Restricts a locale-keyed value to the requested locales.
    ///
    /// Compound keys are fanned out into one entry per token. When exactly one
    /// entry survives, its bare value is returned. Plain values are returned
    /// unchanged.
    pub fn select(&self, locales: &[String]) -> Localized<T> {
        let map = match self {
            Localized::Plain(value) => return Localized::Plain(value.clone()),
            Localized::ByLocale(map) => map,
        };

        let any = locales.iter().any(|l| l == WILDCARD);
        let mut selected = LocaleMap::new();
        for (key, value) in map.iter() {
            for token in split_compound_key(key) {
                if any || locales.contains(&token) {
                    selected.insert(token, value.clone());
                }
            }
        }

        match selected.into_single() {
            Ok(value) => Localized::Plain(value),
            Err(map) => Localized::ByLocale(map),
        }
    }
}

impl<T: Serialize> Serialize for Localized<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Localized::Plain(value) => value.serialize(serializer),
            Localized::ByLocale(map) => map.serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> Localized<String> {
        Localized::ByLocale(
            [("en", "ABC"), ("it,es", "123"), (" de,    fr ", "ABC")]
                .into_iter()
                .map(|(k, v)| (k, v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn fans_out_compound_keys() {
        let selected = sample().select(&locales(&["it", "fr"]));
        let map = selected.as_map().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), ["it", "fr"]);
    }

    #[test]
    fn single_match_unwraps() {
        assert_eq!(sample().select(&locales(&["es"])), Localized::Plain("123".to_string()));
    }

    #[test]
    fn wildcard_keeps_everything() {
        let selected = sample().select(&locales(&["*"]));
        assert_eq!(selected.as_map().unwrap().len(), 5);
    }

    #[test]
    fn plain_values_pass_through() {
        let plain = Localized::Plain("ABC".to_string());
        assert_eq!(plain.select(&locales(&["de"])), plain);
    }
}
