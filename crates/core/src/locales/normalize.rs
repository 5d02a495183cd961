use serde_yaml::Value;

use crate::values::{FlatListOptions, to_flat_list};

/// The locale token meaning "every locale".
pub const WILDCARD: &str = "*";

/// Normalizes any locale input into a flat, trimmed, deduplicated list.
///
/// Accepts a scalar, nested sequences, or comma-joined strings. Empty entries
/// are dropped and first-seen order is kept.
pub fn normalize_locales(input: &Value) -> Vec<String> {
    to_flat_list(input, FlatListOptions::default())
}

/// Splits a compound locale key such as `"it, es"` into its tokens.
pub fn split_compound_key(key: &str) -> Vec<String> {
    key.split(',').map(str::trim).filter(|s| !s.is_empty()).map(str::to_string).collect()
}

/// Anything that can be turned into a normalized locale list.
pub trait IntoLocales {
    fn into_locales(self) -> Vec<String>;
}

/// An explicitly empty locale request; reads fall back to the default locale.
#[derive(Debug, Clone, Copy, Default)]
pub struct Locales;

impl IntoLocales for Locales {
    fn into_locales(self) -> Vec<String> {
        Vec::new()
    }
}

impl IntoLocales for &Value {
    fn into_locales(self) -> Vec<String> {
        normalize_locales(self)
    }
}

impl IntoLocales for &str {
    fn into_locales(self) -> Vec<String> {
        normalize_locales(&Value::String(self.to_string()))
    }
}

impl IntoLocales for String {
    fn into_locales(self) -> Vec<String> {
        normalize_locales(&Value::String(self))
    }
}

impl IntoLocales for &String {
    fn into_locales(self) -> Vec<String> {
        self.as_str().into_locales()
    }
}

impl<S: AsRef<str>> IntoLocales for &[S] {
    fn into_locales(self) -> Vec<String> {
        let items = self.iter().map(|s| Value::String(s.as_ref().to_string())).collect();
        normalize_locales(&Value::Sequence(items))
    }
}

impl<S: AsRef<str>, const N: usize> IntoLocales for [S; N] {
    fn into_locales(self) -> Vec<String> {
        self.as_slice().into_locales()
    }
}

impl<S: AsRef<str>> IntoLocales for Vec<S> {
    fn into_locales(self) -> Vec<String> {
        self.as_slice().into_locales()
    }
}

impl<S: AsRef<str>> IntoLocales for &Vec<S> {
    fn into_locales(self) -> Vec<String> {
        self.as_slice().into_locales()
    }
}
