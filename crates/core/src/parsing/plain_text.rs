use serde_yaml::Value;
use tracing::{debug, warn};

use super::engine::ParsingEngine;
use super::options::ParseOptions;
use crate::content::Content;
use crate::error::{Error, Result};
use crate::scanner::{Cursor, filter_text};

/// Plain text documents with a YAML metadata block.
///
/// ```text
/// {{metadata}}
/// title: Hello
/// {{/metadata}}
/// Body text, with {{content: it}}optional Italian-only parts{{/content}}.
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainText;

impl PlainText {
    pub const NAME: &'static str = "plain_text";
}

impl ParsingEngine for PlainText {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    /// Everything before the metadata start marker is discarded. Without a
    /// complete metadata block the whole (trimmed) input is the body.
    fn separate_components(&self, raw: &str, options: &ParseOptions) -> Result<(String, String)> {
        let raw = raw.trim();
        let tags = options.meta_tag_pair().compile()?;
        let mut cursor = Cursor::new(raw);

        if let Some(start) = cursor.find_next(&tags.start) {
            cursor.consume_to(start.end());
            if let Some(end) = cursor.find_next(&tags.end) {
                let metadata = cursor.slice_to(end.start()).trim().to_string();
                cursor.consume_to(end.end());
                debug!(len = metadata.len(), "metadata block found");
                return Ok((metadata, cursor.rest().trim().to_string()));
            }
        }

        Ok((String::new(), raw.to_string()))
    }

    /// Decodes the block as YAML. A blank block gives null; anything that is
    /// not a mapping falls back to `options.default` when set.
    fn parse_metadata(&self, text: &str, options: &ParseOptions) -> Result<Value> {
        if text.trim().is_empty() {
            return Ok(Value::Null);
        }

        let reason = match serde_yaml::from_str::<Value>(text) {
            Ok(value @ Value::Mapping(_)) => return Ok(value),
            Ok(other) => format!("expected a mapping, found {}", describe(&other)),
            Err(e) => e.to_string(),
        };

        match &options.default {
            Some(default) => {
                warn!(%reason, "metadata could not be decoded, using the default");
                Ok(default.clone())
            }
            None => Err(Error::InvalidMetadata(reason)),
        }
    }

    fn filter_content(
        &self,
        content: &Content,
        locales: &[String],
        options: &ParseOptions,
    ) -> Result<String> {
        let tags = options.content_tag_pair().compile()?;
        let locales = Content::validate_locales(locales, Some(content), content.default_locale())?;
        Ok(filter_text(content.body().trim(), &tags, &locales))
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locales::Localized;
    use crate::scanner::TagPair;

    const SAMPLE_METADATA: &str = r#"title: "OK"
locales:
  - it
  - en
more:
  it: "Continua"
  en: "Continue"
other:
  status: "OK"
"#;

    const SAMPLE_CONTENT: &str = "This is a content.

{{content: en}}
Optionally I'm filtered only for English.
{{/content}}
";

    fn sample_valid() -> String {
        format!("\n\n{{{{metadata}}}}\n{SAMPLE_METADATA}\n{{{{/metadata}}}}\n\n{SAMPLE_CONTENT}\n\n")
    }

    fn opts() -> ParseOptions {
        ParseOptions::default()
    }

    #[test]
    fn separates_metadata_and_body() {
        let (metadata, body) = PlainText.separate_components(&sample_valid(), &opts()).unwrap();
        assert_eq!(metadata, SAMPLE_METADATA.trim());
        assert_eq!(body, SAMPLE_CONTENT.trim());
    }

    #[test]
    fn missing_markers_leave_everything_in_the_body() {
        let unterminated = format!("{{{{metadata}}}}\n{SAMPLE_CONTENT}");
        assert_eq!(
            PlainText.separate_components(&unterminated, &opts()).unwrap(),
            (String::new(), unterminated.trim().to_string())
        );
        assert_eq!(
            PlainText.separate_components(SAMPLE_CONTENT, &opts()).unwrap(),
            (String::new(), SAMPLE_CONTENT.trim().to_string())
        );
    }

    #[test]
    fn custom_metadata_tags() {
        let options = opts().meta_tags(TagPair::new("[meta]", "[/meta]"));
        let parts = PlainText
            .separate_components("[meta]{{metadata}}OK\n[/meta] REST", &options)
            .unwrap();
        assert_eq!(parts, ("{{metadata}}OK".to_string(), "REST".to_string()));

        let options = opts().meta_tags(TagPair::new("---", "---"));
        let parts = PlainText.separate_components("---\ntitle: T\n---\nBody", &options).unwrap();
        assert_eq!(parts, ("title: T".to_string(), "Body".to_string()));
    }

    #[test]
    fn decodes_yaml_mappings() {
        let value = PlainText.parse_metadata("---\nyaml:\n  :a: 'b'", &opts()).unwrap();
        assert_eq!(value["yaml"][":a"], Value::from("b"));
        assert_eq!(PlainText.parse_metadata("  \n", &opts()).unwrap(), Value::Null);
    }

    #[test]
    fn undecodable_metadata_uses_default_or_fails() {
        let options = opts().default_metadata(Value::from("DEFAULT"));
        assert_eq!(PlainText.parse_metadata("---\n\"yaml:", &options).unwrap(), Value::from("DEFAULT"));
        assert_eq!(PlainText.parse_metadata("- a\n- b", &options).unwrap(), Value::from("DEFAULT"));

        assert!(matches!(
            PlainText.parse_metadata("---\n\"yaml:", &opts()),
            Err(Error::InvalidMetadata(_))
        ));
        assert!(matches!(
            PlainText.parse_metadata("just a string", &opts()),
            Err(Error::InvalidMetadata(reason)) if reason.contains("a string")
        ));
    }

    #[test]
    fn parses_a_whole_document() {
        let content = PlainText.parse(&sample_valid(), &opts()).unwrap();

        assert_eq!(content.title(), &Localized::Plain("OK".into()));
        assert_eq!(content.locales(), ["it", "en"]);
        assert_eq!(content.body(), SAMPLE_CONTENT.trim());
        assert_eq!(content.get_more(["it"]).unwrap(), Localized::Plain("Continua".into()));
        assert_eq!(
            content.metadata().get("other").and_then(|v| v.get("status")),
            Some(&Value::from("OK"))
        );
    }

    #[test]
    fn parse_switches_drop_metadata_or_body() {
        let content = PlainText.parse(&sample_valid(), &opts().metadata(false)).unwrap();
        assert_eq!(content.title(), &Localized::Plain(String::new()));
        assert!(content.metadata().is_empty());
        assert!(content.author().is_none());
        assert_eq!(content.body(), SAMPLE_CONTENT.trim());

        let content = PlainText.parse(&sample_valid(), &opts().content(false)).unwrap();
        assert_eq!(content.title(), &Localized::Plain("OK".into()));
        assert_eq!(content.body(), "");
    }

    #[test]
    fn filters_body_by_locale() {
        let content = PlainText.parse(&sample_valid(), &opts()).unwrap();

        let en = PlainText.filter_content(&content, &["en".into()], &opts()).unwrap();
        assert!(en.contains("Optionally I'm filtered only for English."));

        let it = PlainText.filter_content(&content, &["it".into()], &opts()).unwrap();
        assert_eq!(it.trim(), "This is a content.");

        let err = PlainText.filter_content(&content, &["de".into()], &opts()).unwrap_err();
        assert!(matches!(err, Error::UnavailableLocalization(locales) if locales == ["de"]));
    }

    #[test]
    fn empty_query_uses_the_content_default_locale() {
        let content = Content::create(&Value::Null, "A{{content: it}}B{{/content}}")
            .unwrap()
            .with_default_locale("it");
        assert_eq!(content.get_body(crate::locales::Locales, &PlainText).unwrap(), "AB");

        let content = content.with_default_locale("en");
        assert_eq!(content.get_body(crate::locales::Locales, &PlainText).unwrap(), "A");
    }

    #[test]
    fn custom_content_tags() {
        let content = Content::create(&Value::Null, "[content-it]{{content: !it}}IT[/content]\nOK")
            .unwrap();
        let options = opts().content_tags(TagPair::new("[content-%ARGS%]", "[/content]"));

        let it = PlainText.filter_content(&content, &["it".into()], &options).unwrap();
        assert_eq!(it, "{{content: !it}}IT\nOK");
        let en = PlainText.filter_content(&content, &["en".into()], &options).unwrap();
        assert_eq!(en, "\nOK");
    }
}
