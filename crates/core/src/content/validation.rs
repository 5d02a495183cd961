//! Shape checks for author contact fields.

use std::sync::LazyLock;

use regex::Regex;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^([a-z0-9_\.\-\+]+)@([\da-z\.\-]+)\.([a-z\.]{2,6})$").unwrap()
});

static URL_RE: LazyLock<Regex> = LazyLock::new(|| {
    // scheme://[sub.]domain.tld[:port][path?query#fragment]
    Regex::new(r"(?i)^(([a-z0-9\-]+://)(([\w-]+\.)?)([\w-]+)(\.[a-z]+)((:\d+)?)([\S|\?]*))$")
        .unwrap()
});

/// Returns true when `text` (trimmed) looks like `local@domain.tld`.
pub fn is_email(text: &str) -> bool {
    EMAIL_RE.is_match(text.trim())
}

/// Returns true when `text` (trimmed) looks like an absolute URL.
pub fn is_url(text: &str) -> bool {
    URL_RE.is_match(text.trim())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("shogun@example.com", true)]
    #[case(" first.last+tag@mail.example.co.uk ", true)]
    #[case("UPPER@EXAMPLE.ORG", true)]
    #[case("invalid", false)]
    #[case("missing@tld", false)]
    #[case("two@@example.com", false)]
    #[case("", false)]
    fn validates_emails(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_email(input), expected);
    }

    #[rstest]
    #[case("http://example.com", true)]
    #[case("https://www.example.com:8080/path/to?q=1#frag", true)]
    #[case("ftp://files.example.org/a.png", true)]
    #[case("example.com", false)]
    #[case("http://localhost", false)]
    #[case("not a url", false)]
    fn validates_urls(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_url(input), expected);
    }
}
