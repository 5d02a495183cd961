//! Locale set utilities and locale-keyed attribute values.

pub mod localized;
pub mod map;
pub mod normalize;

pub use localized::Localized;
pub use map::LocaleMap;
pub use normalize::{IntoLocales, Locales, WILDCARD, normalize_locales, split_compound_key};
