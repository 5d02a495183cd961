//! Formatting helpers shared by the commands.

use chrono::{DateTime, SecondsFormat, Utc};
use lingomark_core::{Author, Content, Localized};
use tabled::Tabled;

/// One attribute of a parsed document.
#[derive(Tabled)]
pub struct AttributeRow {
    #[tabled(rename = "Attribute")]
    pub name: String,
    #[tabled(rename = "Value")]
    pub value: String,
}

impl AttributeRow {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self { name: name.into(), value: value.into() }
    }
}

/// Rows for every attribute, with the metadata keys last.
pub fn attribute_rows(
    content: &Content,
    title: &Localized<String>,
    summary: &Localized<String>,
    tags: &Localized<Vec<String>>,
    more: &Localized<String>,
) -> Vec<AttributeRow> {
    let mut rows = vec![
        AttributeRow::new("uid", content.uid().unwrap_or("")),
        AttributeRow::new("locales", content.locales().join(", ")),
        AttributeRow::new("title", localized_text(title)),
        AttributeRow::new("summary", localized_text(summary)),
        AttributeRow::new("tags", localized_list(tags)),
        AttributeRow::new("more", localized_text(more)),
        AttributeRow::new("author", content.author().map(author_line).unwrap_or_default()),
        AttributeRow::new("created_at", date(content.created_at())),
        AttributeRow::new("updated_at", date(content.updated_at())),
    ];

    for (key, value) in content.metadata().iter() {
        let value = serde_json::to_string(value).unwrap_or_default();
        rows.push(AttributeRow::new(format!("metadata.{key}"), value));
    }
    rows
}

pub fn localized_text(value: &Localized<String>) -> String {
    match value {
        Localized::Plain(text) => text.clone(),
        Localized::ByLocale(map) => {
            map.iter().map(|(locale, text)| format!("{locale}: {text}")).collect::<Vec<_>>().join("; ")
        }
    }
}

pub fn localized_list(value: &Localized<Vec<String>>) -> String {
    match value {
        Localized::Plain(items) => items.join(", "),
        Localized::ByLocale(map) => map
            .iter()
            .map(|(locale, items)| format!("{locale}: {}", items.join(", ")))
            .collect::<Vec<_>>()
            .join("; "),
    }
}

fn author_line(author: &Author) -> String {
    match author.email() {
        Some(email) => format!("{} <{email}>", author.name()),
        None => author.name().to_string(),
    }
}

fn date(value: Option<DateTime<Utc>>) -> String {
    value.map(|d| d.to_rfc3339_opts(SecondsFormat::AutoSi, true)).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use lingomark_core::LocaleMap;

    #[test]
    fn formats_localized_values() {
        assert_eq!(localized_text(&Localized::Plain("T".into())), "T");

        let map: LocaleMap<String> = [("en", "Hi".to_string()), ("it", "Ciao".to_string())]
            .into_iter()
            .collect();
        assert_eq!(localized_text(&Localized::ByLocale(map)), "en: Hi; it: Ciao");

        let tags: LocaleMap<Vec<String>> =
            [("en", vec!["a".to_string(), "b".to_string()])].into_iter().collect();
        assert_eq!(localized_list(&Localized::ByLocale(tags)), "en: a, b");
    }

    #[test]
    fn author_line_includes_email() {
        let author = Author::new("Jane").with_email("jane@example.com");
        assert_eq!(author_line(&author), "Jane <jane@example.com>");
        assert_eq!(author_line(&Author::new("Anon")), "Anon");
    }
}
