//! The author of a piece of content.

use serde_json::{Map, Value as JsonValue, json};
use serde_yaml::Value;

use super::json::{JsonOptions, to_json_value};
use super::validation::{is_email, is_url};
use crate::values::{MetadataMap, to_string_or_empty};

/// Who wrote a piece of content.
///
/// `email`, `website` and `image` are only kept when they look valid; an
/// invalid value is silently dropped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Author {
    uid: Option<String>,
    name: String,
    email: Option<String>,
    website: Option<String>,
    image: Option<String>,
    metadata: MetadataMap,
}

impl Author {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), ..Self::default() }
    }

    /// Builds an author from a decoded metadata value.
    ///
    /// A mapping provides `uid`, `name`, `email`, `website`, `image` and
    /// `metadata`; every other key is folded into the metadata, overriding
    /// entries of the explicit `metadata` mapping. Any other value is used as
    /// the name (null gives an empty name).
    pub fn create(data: &Value) -> Self {
        let Value::Mapping(mapping) = data else {
            return Self::new(to_string_or_empty(data));
        };

        let mut author = Self::default();
        let mut explicit_metadata = MetadataMap::new();
        let mut rest = MetadataMap::new();

        for (key, value) in mapping {
            match to_string_or_empty(key).as_str() {
                "uid" => author.set_uid(optional_string(value)),
                "name" => author.name = to_string_or_empty(value),
                "email" => author.set_email(optional_string(value)),
                "website" => author.set_website(optional_string(value)),
                "image" => author.set_image(optional_string(value)),
                "metadata" => explicit_metadata = MetadataMap::from_value(value),
                other => {
                    rest.insert(other, value.clone());
                }
            }
        }

        // Reuse from_value so nested keys of the loose entries are stringified.
        explicit_metadata.merge(MetadataMap::from_value(&rest.to_value()));
        author.metadata = explicit_metadata;
        author
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.set_email(Some(email.into()));
        self
    }

    pub fn with_website(mut self, website: impl Into<String>) -> Self {
        self.set_website(Some(website.into()));
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.set_image(Some(image.into()));
        self
    }

    pub fn with_metadata(mut self, metadata: MetadataMap) -> Self {
        self.metadata = metadata;
        self
    }

    pub fn uid(&self) -> Option<&str> {
        self.uid.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }

    pub fn website(&self) -> Option<&str> {
        self.website.as_deref()
    }

    pub fn image(&self) -> Option<&str> {
        self.image.as_deref()
    }

    pub fn metadata(&self) -> &MetadataMap {
        &self.metadata
    }

    pub fn set_uid(&mut self, uid: Option<String>) {
        self.uid = uid;
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_email(&mut self, email: Option<String>) {
        self.email = email.filter(|e| is_email(e));
    }

    pub fn set_website(&mut self, website: Option<String>) {
        self.website = website.filter(|w| is_url(w));
    }

    pub fn set_image(&mut self, image: Option<String>) {
        self.image = image.filter(|i| is_url(i));
    }

    pub fn set_metadata(&mut self, metadata: MetadataMap) {
        self.metadata = metadata;
    }

    /// Exports the author as a JSON object.
    pub fn to_json(&self, options: &JsonOptions) -> JsonValue {
        let fields = [
            ("uid", json!(self.uid)),
            ("name", json!(self.name)),
            ("email", json!(self.email)),
            ("website", json!(self.website)),
            ("image", json!(self.image)),
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

fn optional_string(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        other => Some(to_string_or_empty(other)),
    }
}
