use comrak::html::write_opening_tag;
use comrak::nodes::{AstNode, NodeValue};
use comrak::{Arena, Options};

use super::{Filter, FilterContext, FilterError, failed, html_inline, str_option};

/// Replaces `:shortcode:` with an emoji image under `asset_root`.
///
/// Shortcodes are the GitHub (gemoji) set; unknown ones are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct Emoji;

impl Emoji {
    /// Image file stem of an emoji: its codepoints in hex, joined by `-`,
    /// without variation selectors.
    pub fn codepoints(emoji: &str) -> String {
        emoji
            .chars()
            .filter(|c| *c != '\u{fe0f}')
            .map(|c| format!("{:x}", u32::from(c)))
            .collect::<Vec<_>>()
            .join("-")
    }
}

impl Filter for Emoji {
    fn name(&self) -> &'static str {
        "emoji"
    }

    fn configure(&self, options: &mut Options<'_>, _context: &FilterContext) -> Result<(), FilterError> {
        options.extension.shortcodes = true;
        Ok(())
    }

    fn transform<'a>(
        &self,
        arena: &'a Arena<AstNode<'a>>,
        root: &'a AstNode<'a>,
        context: &FilterContext,
    ) -> Result<(), FilterError> {
        let asset_root = str_option(context, self.name(), "asset_root", "/")?.trim_end_matches('/');

        let shortcodes: Vec<_> = root
            .descendants()
            .filter_map(|node| match &node.data.borrow().value {
                NodeValue::ShortCode(nsc) => Some((node, nsc.code.clone(), nsc.emoji.clone())),
                _ => None,
            })
            .collect();

        for (node, code, emoji) in shortcodes {
            let title = format!(":{code}:");
            let src = format!("{asset_root}/emoji/unicode/{}.png", Self::codepoints(&emoji));
            let mut img = Vec::new();
            write_opening_tag(
                &mut img,
                "img",
                [
                    ("class", "emoji"),
                    ("title", title.as_str()),
                    ("alt", title.as_str()),
                    ("src", src.as_str()),
                    ("height", "20"),
                    ("width", "20"),
                    ("align", "absmiddle"),
                ],
            )
            .map_err(|e| failed(self.name(), e))?;
            let img = String::from_utf8(img).map_err(|e| failed(self.name(), e))?;

            node.insert_before(html_inline(arena, img));
            node.detach();
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Markdown, run_filters};
    use super::*;
    use serde_json::json;

    fn run(markdown: &str, context: &FilterContext) -> String {
        run_filters(&[&Markdown, &Emoji], markdown, context).unwrap()
    }

    #[test]
    fn replaces_known_shortcodes() {
        let context = json!({ "asset_root": "https://cdn.example.com/" });
        let output = run("Done :tada: :nope:", context.as_object().unwrap());
        insta::assert_snapshot!(output.trim(), @r#"<p>Done <img class="emoji" title=":tada:" alt=":tada:" src="https://cdn.example.com/emoji/unicode/1f389.png" height="20" width="20" align="absmiddle"> :nope:</p>"#);
    }

    #[test]
    fn covers_the_github_set() {
        let output = run(":heart_eyes: :100: :+1:", &FilterContext::new());
        assert!(output.contains(r#"src="/emoji/unicode/1f60d.png""#));
        assert!(output.contains(r#"src="/emoji/unicode/1f4af.png""#));
        assert!(output.contains(r#"src="/emoji/unicode/1f44d.png""#));
        assert!(!output.contains(":100: "));
    }

    #[test]
    fn default_asset_root_is_site_root() {
        let output = run(":smile:", &FilterContext::new());
        assert!(output.contains(r#"src="/emoji/unicode/1f604.png""#));
    }

    #[test]
    fn leaves_code_alone() {
        assert_eq!(run("`:smile:`", &FilterContext::new()).trim(), "<p><code>:smile:</code></p>");
    }

    #[test]
    fn codepoints_drop_variation_selectors() {
        assert_eq!(Emoji::codepoints("\u{2764}\u{fe0f}"), "2764");
        assert_eq!(Emoji::codepoints("\u{1f1ee}\u{1f1f9}"), "1f1ee-1f1f9");
    }
}
