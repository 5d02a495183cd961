use comrak::html::write_opening_tag;
use comrak::nodes::{AstNode, NodeLink, NodeValue};
use comrak::Arena;

use super::{Filter, FilterContext, FilterError, failed, html_inline};

/// Keeps markdown images within their container.
///
/// Every image gets `max-width:100%;` and, unless it is already inside a
/// link, is wrapped in a link to the full-size image.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageMaxWidth;

impl Filter for ImageMaxWidth {
    fn name(&self) -> &'static str {
        "image_max_width"
    }

    fn transform<'a>(
        &self,
        arena: &'a Arena<AstNode<'a>>,
        root: &'a AstNode<'a>,
        _context: &FilterContext,
    ) -> Result<(), FilterError> {
        let images: Vec<_> = root
            .descendants()
            .filter_map(|node| match &node.data.borrow().value {
                NodeValue::Image(link) => Some((node, link.clone())),
                _ => None,
            })
            .collect();

        for (node, image) in images {
            let linked = node
                .ancestors()
                .skip(1)
                .any(|a| matches!(a.data.borrow().value, NodeValue::Link(_)));

            let html = image_html(&image, &alt_text(node), !linked).map_err(|e| failed(self.name(), e))?;
            node.insert_before(html_inline(arena, html));
            node.detach();
        }

        Ok(())
    }
}

fn image_html(image: &NodeLink, alt: &str, wrap: bool) -> std::io::Result<String> {
    let mut out = Vec::new();
    if wrap {
        write_opening_tag(&mut out, "a", [("target", "_blank"), ("href", image.url.as_str())])?;
    }

    let mut attributes = vec![("src", image.url.as_str()), ("alt", alt)];
    if !image.title.is_empty() {
        attributes.push(("title", image.title.as_str()));
    }
    attributes.push(("style", "max-width:100%;"));
    write_opening_tag(&mut out, "img", attributes)?;

    if wrap {
        out.extend_from_slice(b"</a>");
    }
    String::from_utf8(out).map_err(std::io::Error::other)
}

/// Plain text of an image description, as used for `alt`.
fn alt_text<'a>(node: &'a AstNode<'a>) -> String {
    node.descendants()
        .filter_map(|n| match &n.data.borrow().value {
            NodeValue::Text(text) => Some(text.clone()),
            NodeValue::Code(code) => Some(code.literal.clone()),
            NodeValue::SoftBreak | NodeValue::LineBreak => Some(" ".to_string()),
            _ => None,
        })
        .collect()
}
