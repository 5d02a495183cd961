use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{Map, Value as JsonValue, json};
use serde_yaml::Value;
use tracing::trace;

use super::author::Author;
use super::dates::ToUtc;
use super::json::{JsonOptions, to_json_value};
use crate::error::{Error, Result};
use crate::locales::{IntoLocales, LocaleMap, Localized, WILDCARD};
use crate::parsing::ParsingEngine;
use crate::values::{FlatListOptions, MetadataMap, to_flat_list, to_string_or_empty};

/// The locale used when a read does not ask for any.
pub const DEFAULT_LOCALE: &str = "en";

/// A parsed document: its body plus the attributes decoded from metadata.
///
/// Title, summary, "more" label and tags may hold one value per locale. The
/// `get_*` readers filter those by locale after checking that the content is
/// enabled for the requested locales at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Content {
    uid: Option<String>,
    locales: Vec<String>,
    title: Localized<String>,
    summary: Localized<String>,
    body: String,
    tags: Localized<Vec<String>>,
    more: Localized<String>,
    author: Option<Author>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    metadata: MetadataMap,
    default_locale: String,
}

impl Default for Content {
    fn default() -> Self {
        Self {
            uid: None,
            locales: Vec::new(),
            title: Localized::default(),
            summary: Localized::default(),
            body: String::new(),
            tags: Localized::default(),
            more: Localized::default(),
            author: None,
            created_at: None,
            updated_at: None,
            metadata: MetadataMap::new(),
            default_locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl Content {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a content from decoded metadata and a raw body.
    ///
    /// Known keys (`uid`, `title`, `summary`, `author`, `tags`, `more`,
    /// `created_at`, `updated_at`, `locales`) go through their setters; every
    /// other key ends up in [`metadata`](Self::metadata). When `metadata` is
    /// not a mapping it is ignored. A mapping always yields an author, even
    /// when the `author` key is missing.
    pub fn create(metadata: &Value, body: &str) -> Result<Self> {
        let mut content = Self::new();
        content.set_body(body.trim());

        let Value::Mapping(mapping) = metadata else {
            return Ok(content);
        };

        let mut known = KnownFields::default();
        let mut rest = serde_yaml::Mapping::new();
        for (key, value) in mapping {
            let slot = match to_string_or_empty(key).as_str() {
                "uid" => &mut known.uid,
                "title" => &mut known.title,
                "summary" => &mut known.summary,
                "author" => &mut known.author,
                "tags" => &mut known.tags,
                "more" => &mut known.more,
                "created_at" => &mut known.created_at,
                "updated_at" => &mut known.updated_at,
                "locales" => &mut known.locales,
                _ => {
                    rest.insert(key.clone(), value.clone());
                    continue;
                }
            };
            *slot = value.clone();
        }

        content.set_uid(match &known.uid {
            Value::Null => None,
            other => Some(to_string_or_empty(other)),
        });
        content.set_title(known.title);
        content.set_summary(known.summary);
        content.set_author(Some(Author::create(&known.author)));
        content.set_tags(known.tags);
        content.set_more(known.more);
        content.set_created_at(&known.created_at)?;
        content.set_updated_at(&known.updated_at)?;
        content.set_locales(&locales_from_metadata(known.locales));
        content.set_metadata(Value::Mapping(rest));

        Ok(content)
    }

    pub fn with_default_locale(mut self, locale: impl Into<String>) -> Self {
        self.set_default_locale(locale);
        self
    }

    // Plain accessors.

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn locales(&self) -> &[String] {
        &self.locales
    }

    pub fn title(&self) -> &Localized<String> {
        &self.title
    }

    pub fn summary(&self) -> &Localized<String> {
        &self.summary
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn tags(&self) -> &Localized<Vec<String>> {
        &self.tags
    }

    pub fn more(&self) -> &Localized<String> {
        &self.more
    }

    pub fn author(&self) -> Option<&Author> {
        self.author.as_ref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    pub fn metadata(&self) -> &MetadataMap {
        &self.metadata
    }

    /// The locale substituted when a read asks for no locale at all.
    pub fn default_locale(&self) -> &str {
        &self.default_locale
    }

    // Setters.

    pub fn set_uid(&mut self, uid: Option<String>) {
        self.uid = uid;
    }

    pub fn set_locales(&mut self, locales: impl IntoLocales) {
        self.locales = locales.into_locales();
    }

    pub fn set_title(&mut self, title: impl Into<Value>) {
        self.title = localized_text(&title.into());
    }

    pub fn set_summary(&mut self, summary: impl Into<Value>) {
        self.summary = localized_text(&summary.into());
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Sets the tags. Strings are split on commas; nested lists are flattened.
    pub fn set_tags(&mut self, tags: impl Into<Value>) {
        self.tags = match tags.into() {
            Value::Mapping(mapping) => Localized::ByLocale(
                mapping
                    .iter()
                    .map(|(k, v)| (to_string_or_empty(k), to_flat_list(v, FlatListOptions::default())))
                    .collect(),
            ),
            other => Localized::Plain(to_flat_list(&other, FlatListOptions::default())),
        };
    }

    pub fn set_more(&mut self, more: impl Into<Value>) {
        self.more = localized_text(&more.into());
    }

    pub fn set_author(&mut self, author: Option<Author>) {
        self.author = author;
    }

    /// Sets the author from a loose value: null clears it, a mapping goes
    /// through [`Author::create`], anything else becomes the author's name.
    pub fn set_author_value(&mut self, author: &Value) {
        self.author = match author {
            Value::Null => None,
            Value::Mapping(_) => Some(Author::create(author)),
            other => Some(Author::new(to_string_or_empty(other))),
        };
    }

    pub fn set_created_at(&mut self, value: impl ToUtc) -> Result<()> {
        self.created_at = value.to_utc()?;
        Ok(())
    }

    /// Sets the update time, falling back to the creation time when `value`
    /// holds no date.
    pub fn set_updated_at(&mut self, value: impl ToUtc) -> Result<()> {
        self.updated_at = value.to_utc()?.or(self.created_at);
        Ok(())
    }

    /// Sets the metadata. A non-mapping value is kept under the `raw` key.
    pub fn set_metadata(&mut self, metadata: impl Into<Value>) {
        self.metadata = match metadata.into() {
            mapping @ Value::Mapping(_) => MetadataMap::from_value(&mapping),
            other => {
                let mut map = MetadataMap::new();
                map.insert("raw", other);
                map
            }
        };
    }

    pub fn set_default_locale(&mut self, locale: impl Into<String>) {
        let locale = locale.into();
        let locale = locale.trim();
        self.default_locale =
            if locale.is_empty() { DEFAULT_LOCALE.to_string() } else { locale.to_string() };
    }

    // Locale-aware reads.

    /// Whether the content is visible for at least one of `locales`.
    ///
    /// `"*"` is stripped from the query first, so a query of only `"*"`
    /// behaves like an empty query.
    pub fn enabled_for_locales(&self, locales: impl IntoLocales) -> bool {
        let query: Vec<String> =
            locales.into_locales().into_iter().filter(|l| l != WILDCARD).collect();
        self.locales.is_empty()
            || query.is_empty()
            || self.locales.iter().any(|own| query.contains(own))
    }

    /// Normalizes a locale query, substituting `default_locale` when it is
    /// empty, and checks it against `content` when one is given.
    pub fn validate_locales(
        locales: impl IntoLocales,
        content: Option<&Content>,
        default_locale: &str,
    ) -> Result<Vec<String>> {
        let mut locales = locales.into_locales();
        if locales.is_empty() {
            locales.push(default_locale.to_string());
        }

        if let Some(content) = content {
            if !content.enabled_for_locales(locales.as_slice()) {
                return Err(Error::UnavailableLocalization(locales));
            }
        }
        Ok(locales)
    }

    pub fn get_title(&self, locales: impl IntoLocales) -> Result<Localized<String>> {
        self.filter_attribute(&self.title, locales)
    }

    pub fn get_summary(&self, locales: impl IntoLocales) -> Result<Localized<String>> {
        self.filter_attribute(&self.summary, locales)
    }

    pub fn get_tags(&self, locales: impl IntoLocales) -> Result<Localized<Vec<String>>> {
        self.filter_attribute(&self.tags, locales)
    }

    pub fn get_more(&self, locales: impl IntoLocales) -> Result<Localized<String>> {
        self.filter_attribute(&self.more, locales)
    }

    /// Returns the body restricted to `locales` by the given engine.
    pub fn get_body(
        &self,
        locales: impl IntoLocales,
        engine: &dyn ParsingEngine,
    ) -> Result<String> {
        engine.filter_content(self, &locales.into_locales(), &Default::default())
    }

    fn filter_attribute<T: Clone>(
        &self,
        attribute: &Localized<T>,
        locales: impl IntoLocales,
    ) -> Result<Localized<T>> {
        let locales = Self::validate_locales(locales, Some(self), &self.default_locale)?;
        trace!(?locales, localized = attribute.is_localized(), "filtering attribute");
        Ok(attribute.select(&locales))
    }

    /// Exports the content as a JSON object.
    pub fn to_json(&self, options: &JsonOptions) -> JsonValue {
        let author = match &self.author {
            Some(author) => author.to_json(&JsonOptions::default()),
            None => JsonValue::Null,
        };
        let fields = [
            ("uid", json!(self.uid)),
            ("locales", json!(self.locales)),
            ("title", to_json_value(&self.title)),
            ("summary", to_json_value(&self.summary)),
            ("body", json!(self.body)),
            ("tags", to_json_value(&self.tags)),
            ("more", to_json_value(&self.more)),
            ("author", author),
            ("created_at", json!(self.created_at.map(rfc3339))),
            ("updated_at", json!(self.updated_at.map(rfc3339))),
            ("metadata", to_json_value(&self.metadata)),
        ];

        let mut out = Map::new();
        for (key, value) in fields {
            if options.keeps(key, &value) {
                out.insert(key.to_string(), value);
            }
        }
        JsonValue::Object(out)
    }
}

#[derive(Default)]
struct KnownFields {
    uid: Value,
    title: Value,
    summary: Value,
    author: Value,
    tags: Value,
    more: Value,
    created_at: Value,
    updated_at: Value,
    locales: Value,
}

fn localized_text(value: &Value) -> Localized<String> {
    match value {
        Value::Mapping(mapping) => Localized::ByLocale(
            mapping
                .iter()
                .map(|(k, v)| (to_string_or_empty(k), to_string_or_empty(v)))
                .collect::<LocaleMap<String>>(),
        ),
        other => Localized::Plain(to_string_or_empty(other)),
    }
}

/// `locales` in metadata may be a list or a comma separated string.
fn locales_from_metadata(value: Value) -> Value {
    match value {
        Value::Sequence(_) => value,
        other => Value::Sequence(
            to_string_or_empty(&other).split(',').map(|s| Value::String(s.trim().into())).collect(),
        ),
    }
}

fn rfc3339(dt: DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}
