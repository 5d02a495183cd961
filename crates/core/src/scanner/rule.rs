use std::fmt;

use crate::locales::WILDCARD;

/// The locale predicate attached to a body section, e.g. `it, !en`.
///
/// Plain tokens are locales the section is meant for; `!`-prefixed tokens are
/// locales it is hidden from. `!*` carries no exclusion and is dropped.
/// Empty tokens before the last non-empty one are kept as a valid locale that
/// no request names, so `, !en` shows the section to nobody.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleRule {
    raw: String,
    valid: Vec<String>,
    invalid: Vec<String>,
}

impl LocaleRule {
    pub fn parse(raw: &str) -> Self {
        let mut valid = Vec::new();
        let mut invalid = Vec::new();

        for token in tokens(raw) {
            match token.strip_prefix('!') {
                None => valid.push(token),
                Some("*") => {}
                Some(excluded) => invalid.push(excluded.to_string()),
            }
        }

        Self { raw: raw.to_string(), valid, invalid }
    }

    /// The rule of unconditional text.
    pub fn any() -> Self {
        Self { raw: WILDCARD.to_string(), valid: vec![WILDCARD.to_string()], invalid: Vec::new() }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn valid(&self) -> &[String] {
        &self.valid
    }

    pub fn invalid(&self) -> &[String] {
        &self.invalid
    }

    /// Whether a section with this rule is kept for `requested`.
    ///
    /// A `*` in either the request or the rule's valid set always matches.
    /// Otherwise the request must hit the valid set (an empty one accepts
    /// anything) and miss the excluded set.
    pub fn matches(&self, requested: &[String]) -> bool {
        if requested.iter().any(|l| l == WILDCARD) || self.valid.iter().any(|l| l == WILDCARD) {
            return true;
        }

        let wanted = self.valid.is_empty() || requested.iter().any(|l| self.valid.contains(l));
        let excluded = requested.iter().any(|l| self.invalid.contains(l));
        wanted && !excluded
    }
}

/// Comma-separated, trimmed tokens with trailing empty ones removed.
fn tokens(raw: &str) -> Vec<String> {
    let mut tokens: Vec<String> = raw.split(',').map(|t| t.trim().to_string()).collect();
    while tokens.last().is_some_and(String::is_empty) {
        tokens.pop();
    }
    tokens
}

impl Default for LocaleRule {
    fn default() -> Self {
        Self::any()
    }
}

impl fmt::Display for LocaleRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn locales(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn splits_valid_and_invalid_tokens() {
        let rule = LocaleRule::parse(" it, !en ,!*, , es");
        assert_eq!(rule.valid(), ["it", "", "es"]);
        assert_eq!(rule.invalid(), ["en"]);
        assert_eq!(rule.as_str(), " it, !en ,!*, , es");
    }

    #[rstest]
    #[case("it, en", &["it"], true)]
    #[case("it, en", &["es"], false)]
    #[case("it, en", &["es", "en"], true)]
    #[case("!it", &["en"], true)]
    #[case("!it", &["it"], false)]
    #[case("!it", &["it", "en"], false)]
    #[case("!*", &["fr"], true)]
    #[case("", &["fr"], true)]
    #[case("*, !en", &["en"], true)]
    #[case("en", &["*"], true)]
    #[case("it, !it", &["it"], false)]
    #[case(", !en", &["it"], false)]
    #[case(", !en", &["*"], true)]
    #[case("it, ", &["it"], true)]
    fn matches_requested_locales(
        #[case] rule: &str,
        #[case] requested: &[&str],
        #[case] expected: bool,
    ) {
        assert_eq!(LocaleRule::parse(rule).matches(&locales(requested)), expected);
    }

    #[test]
    fn trailing_empty_tokens_are_ignored() {
        assert_eq!(LocaleRule::parse("it, , ").valid(), ["it"]);
        assert!(LocaleRule::parse(" , ").valid().is_empty());
        assert_eq!(LocaleRule::parse(", !en").valid(), [""]);
    }

    #[test]
    fn any_matches_everything() {
        assert!(LocaleRule::any().matches(&locales(&["xx"])));
        assert!(LocaleRule::any().matches(&[]));
    }
}
