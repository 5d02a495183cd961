use lingomark_core::{
    Error, FilterContext, JsonOptions, Localized, ParseOptions, Parser, RenderOptions,
};
use serde_json::json;

const ARTICLE: &str = r#"
{{metadata}}
uid: article-1
title:
  en: Greetings
  it: Saluti
summary: Short
author:
  name: Jane
  email: jane@example.com
  website: http://example.com
  twitter: "@jane"
tags:
  en: [one, two]
  it,es: [uno]
locales: en, it
created_at: 2012-08-08T10:30:00Z
category: news
{{/metadata}}
# Heading

Common paragraph.
{{content: it}}
Paragrafo italiano :smile:
{{/content}}
{{content: !it}}
English paragraph :smile:
{{/content}}
"#;

fn parse() -> lingomark_core::Content {
    Parser::new().parse(ARTICLE, &ParseOptions::new()).unwrap()
}

#[test]
fn parses_attributes() {
    let content = parse();

    assert_eq!(content.uid(), Some("article-1"));
    assert_eq!(content.locales(), ["en", "it"]);
    assert_eq!(content.get_title("it").unwrap(), Localized::Plain("Saluti".to_string()));
    assert_eq!(content.get_summary("en").unwrap(), Localized::Plain("Short".to_string()));
    assert_eq!(content.get_tags("it").unwrap(), Localized::Plain(vec!["uno".to_string()]));
    assert_eq!(content.metadata().get("category"), Some(&"news".into()));

    let author = content.author().unwrap();
    assert_eq!(author.name(), "Jane");
    assert_eq!(author.email(), Some("jane@example.com"));
    assert_eq!(author.metadata().get("twitter"), Some(&"@jane".into()));
}

#[test]
fn unknown_locales_are_rejected() {
    let content = parse();
    let err = content.get_title("fr").unwrap_err();
    assert!(matches!(err, Error::UnavailableLocalization(locales) if locales == ["fr"]));

    let err = Parser::new()
        .render(&content, &RenderOptions::new().locales("fr"), &FilterContext::new())
        .unwrap_err();
    assert!(matches!(err, Error::UnavailableLocalization(_)));
}

#[test]
fn body_follows_locale() {
    let parser = Parser::new();
    let content = parse();

    let italian = parser.body(&content, &["it".to_string()], &ParseOptions::new()).unwrap();
    assert!(italian.contains("Paragrafo italiano"));
    assert!(!italian.contains("English paragraph"));

    let english = parser.body(&content, &[], &ParseOptions::new()).unwrap();
    assert!(english.contains("English paragraph"));
    assert!(!english.contains("Paragrafo italiano"));
}

#[test]
fn renders_html_for_a_locale() {
    let content = parse();
    let html = Parser::new()
        .render(&content, &RenderOptions::new().locales("it"), &FilterContext::new())
        .unwrap();

    assert!(html.contains(r##"<h1><a href="#heading" aria-hidden="true" class="anchor" id="heading"></a>Heading</h1>"##));
    assert!(html.contains("Paragrafo italiano"));
    assert!(html.contains(r#"class="emoji""#));
    assert!(!html.contains("English paragraph"));
}

#[test]
fn toggles_skip_filters() {
    let content = parse();
    let options = RenderOptions::new().locales("en").disable("emoji").disable("toc");
    let html = Parser::new().render(&content, &options, &FilterContext::new()).unwrap();

    assert!(html.contains("<h1>Heading</h1>"));
    assert!(html.contains("English paragraph :smile:"));
}

#[test]
fn exports_json() {
    let content = parse();
    let exported = content.to_json(
        &JsonOptions::default().exclude(["body", "metadata", "author"]).exclude_empty(true),
    );

    assert_eq!(
        exported,
        json!({
            "uid": "article-1",
            "locales": ["en", "it"],
            "title": {"en": "Greetings", "it": "Saluti"},
            "summary": "Short",
            "tags": {"en": ["one", "two"], "it,es": ["uno"]},
            "created_at": "2012-08-08T10:30:00Z",
            "updated_at": "2012-08-08T10:30:00Z",
        })
    );
}
