use tracing::trace;

use super::cursor::Cursor;
use super::rule::LocaleRule;
use super::segment::Segment;
use super::tags::TagPattern;

/// Splits `input` into a tree of literal text and tagged sections.
///
/// Sections may nest. A start tag is paired with its end tag by counting the
/// start tags met on the way, so `{{a}}{{b}}..{{/}}..{{/}}` closes `a` at the
/// second end tag. When the count never gets back to zero the section still
/// runs up to the last end tag found. A start tag whose section is empty or
/// blank (including one with no end tag at all) is kept as literal text and
/// scanning resumes right after it.
///
/// The walk keeps its own stack, so nesting depth is not limited by the call
/// stack.
pub fn scan(input: &str, tags: &TagPattern) -> Vec<Segment> {
    let mut stack = vec![Frame::new(input, LocaleRule::any())];

    loop {
        let Some(frame) = stack.last_mut() else {
            return Vec::new();
        };

        match frame.step(tags) {
            Step::Continue => {}
            Step::Descend(body, rule) => stack.push(Frame::new(body, rule)),
            Step::Done => {
                let Some(done) = stack.pop() else {
                    return Vec::new();
                };
                match stack.last_mut() {
                    Some(parent) => parent
                        .segments
                        .push(Segment::Node { children: done.segments, rule: done.rule }),
                    None => return done.segments,
                }
            }
        }
    }
}

/// One nesting level of the scan.
struct Frame<'a> {
    cursor: Cursor<'a>,
    rule: LocaleRule,
    segments: Vec<Segment>,
}

enum Step<'a> {
    Continue,
    Descend(&'a str, LocaleRule),
    Done,
}

impl<'a> Frame<'a> {
    fn new(input: &'a str, rule: LocaleRule) -> Self {
        Self { cursor: Cursor::new(input), rule, segments: Vec::new() }
    }

    fn step(&mut self, tags: &TagPattern) -> Step<'a> {
        if self.cursor.eof() {
            return Step::Done;
        }

        let Some(start) = self.cursor.find_next(&tags.start) else {
            self.segments.push(Segment::text(self.cursor.rest()));
            self.cursor.consume_to(self.cursor.input().len());
            return Step::Done;
        };

        self.segments.push(Segment::text(self.cursor.slice_to(start.start())));
        self.cursor.consume_to(start.end());

        let body = self.section_body(tags);
        if body.trim().is_empty() {
            trace!(tag = start.as_str(), "unclosed or empty section kept as text");
            self.segments.push(Segment::text(start.as_str()));
            return Step::Continue;
        }

        let rule = LocaleRule::parse(tags.args(start.as_str()));
        trace!(rule = rule.as_str(), len = body.len(), "section");
        Step::Descend(body, rule)
    }

    /// Consumes up to the end tag that balances the start tag just read and
    /// returns the text in between.
    fn section_body(&mut self, tags: &TagPattern) -> &'a str {
        let input = self.cursor.input();
        let body_start = self.cursor.pos();
        let mut body_end = body_start;
        let mut balance: usize = 1;

        while balance > 0 {
            let Some(end) = self.cursor.find_next(&tags.end) else {
                break;
            };

            let chunk = self.cursor.slice_to(end.end());
            balance += count_non_empty(&tags.start, chunk);
            balance -= 1;
            self.cursor.consume_to(end.end());

            let last = balance == 0 || self.cursor.find_next(&tags.end).is_none();
            body_end = if last { end.start() } else { end.end() };
        }

        &input[body_start..body_end]
    }
}

fn count_non_empty(pattern: &regex::Regex, text: &str) -> usize {
    pattern.find_iter(text).filter(|m| !m.is_empty()).count()
}
