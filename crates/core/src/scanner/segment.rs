use super::rule::LocaleRule;

/// One piece of a scanned body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text.
    Leaf { text: String, rule: LocaleRule },
    /// A tagged section and what it contains.
    Node { children: Vec<Segment>, rule: LocaleRule },
}

impl Segment {
    pub fn text(text: impl Into<String>) -> Self {
        Segment::Leaf { text: text.into(), rule: LocaleRule::any() }
    }

    pub fn rule(&self) -> &LocaleRule {
        match self {
            Segment::Leaf { rule, .. } | Segment::Node { rule, .. } => rule,
        }
    }

    /// Renders this segment for `locales`, or `None` when its rule drops it.
    pub fn flatten(&self, locales: &[String]) -> Option<String> {
        self.rule().matches(locales).then(|| flatten(std::slice::from_ref(self), locales))
    }
}

/// Concatenates every kept segment, depth first.
///
/// A dropped node takes all of its children with it.
pub fn flatten(segments: &[Segment], locales: &[String]) -> String {
    let mut out = String::new();
    let mut stack = vec![segments.iter()];

    loop {
        let next = match stack.last_mut() {
            Some(iter) => iter.next(),
            None => break,
        };
        match next {
            None => {
                stack.pop();
            }
            Some(segment) if !segment.rule().matches(locales) => {}
            Some(Segment::Leaf { text, .. }) => out.push_str(text),
            Some(Segment::Node { children, .. }) => stack.push(children.iter()),
        }
    }

    out
}
