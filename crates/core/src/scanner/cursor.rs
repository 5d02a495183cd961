use regex::{Match, Regex};

/// A forward-only position in a string, with regex lookahead.
#[derive(Debug, Clone)]
pub struct Cursor<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    pub fn input(&self) -> &'a str {
        self.input
    }

    pub fn pos(&self) -> usize {
        self.pos
    }

    pub fn eof(&self) -> bool {
        self.pos >= self.input.len()
    }

    /// Finds the next non-empty match of `pattern` at or after the cursor.
    ///
    /// Empty matches are reported as no match, so a degenerate pattern can
    /// never stall a scan.
    pub fn find_next(&self, pattern: &Regex) -> Option<Match<'a>> {
        pattern.find_at(self.input, self.pos).filter(|m| !m.is_empty())
    }

    /// Text between the cursor and `index`.
    pub fn slice_to(&self, index: usize) -> &'a str {
        &self.input[self.pos..index]
    }

    /// Text from the cursor to the end of input.
    pub fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    /// Moves the cursor forward to `index`. Never moves backwards.
    pub fn consume_to(&mut self, index: usize) {
        self.pos = self.pos.max(index.min(self.input.len()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_and_consumes() {
        let re = Regex::new(r"\{\{/content\}\}").unwrap();
        let mut cur = Cursor::new("a{{/content}}b{{/content}}");

        let first = cur.find_next(&re).unwrap();
        assert_eq!(cur.slice_to(first.start()), "a");
        cur.consume_to(first.end());

        let second = cur.find_next(&re).unwrap();
        assert_eq!(cur.slice_to(second.start()), "b");
        cur.consume_to(second.end());

        assert!(cur.eof());
        assert!(cur.find_next(&re).is_none());
    }

    #[test]
    fn never_moves_backwards() {
        let mut cur = Cursor::new("hello");
        cur.consume_to(3);
        cur.consume_to(1);
        assert_eq!(cur.pos(), 3);
        assert_eq!(cur.rest(), "lo");
        cur.consume_to(99);
        assert!(cur.eof());
    }

    #[test]
    fn ignores_empty_matches() {
        let re = Regex::new(r"x*").unwrap();
        let cur = Cursor::new("abc");
        assert!(cur.find_next(&re).is_none());
    }
}
