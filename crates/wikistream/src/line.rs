//! Line-oriented input.
//!
//! A [`Line`] is an immutable view of one line of the source document plus
//! its absolute character offset. [`LineSequence`] splits a document into
//! lines (accepting `\n`, `\r\n` and `\r` conventions) and offers one line
//! of lookahead so blocks can peek without re-scanning.

/// One line of input: text without its terminator, plus the byte offset of
/// its first character in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Line<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> Line<'a> {
    pub fn new(text: &'a str, offset: usize) -> Self {
        Self { text, offset }
    }

    pub fn text(&self) -> &'a str {
        self.text
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Splits a document into [`Line`]s with one line of lookahead.
#[derive(Debug)]
pub struct LineSequence<'a> {
    lines: Vec<Line<'a>>,
    position: usize,
}

impl<'a> LineSequence<'a> {
    pub fn new(source: &'a str) -> Self {
        let mut lines = Vec::new();
        let mut start = 0;
        let bytes = source.as_bytes();
        let mut i = 0;
        while i < bytes.len() {
            match bytes[i] {
                b'\n' => {
                    lines.push(Line::new(&source[start..i], start));
                    i += 1;
                    start = i;
                }
                b'\r' => {
                    lines.push(Line::new(&source[start..i], start));
                    // Treat \r\n as a single terminator
                    i += if bytes.get(i + 1) == Some(&b'\n') { 2 } else { 1 };
                    start = i;
                }
                _ => i += 1,
            }
        }
        if start < source.len() {
            lines.push(Line::new(&source[start..], start));
        }
        Self { lines, position: 0 }
    }

    /// The line at the cursor, if any
    pub fn current(&self) -> Option<Line<'a>> {
        self.lines.get(self.position).copied()
    }

    /// The line after the cursor, without advancing
    pub fn lookahead(&self) -> Option<Line<'a>> {
        self.lines.get(self.position + 1).copied()
    }

    pub fn advance(&mut self) {
        if self.position < self.lines.len() {
            self.position += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unix_line_endings() {
        let mut lines = LineSequence::new("one\ntwo\nthree");
        assert_eq!(lines.current().unwrap().text(), "one");
        assert_eq!(lines.current().unwrap().offset(), 0);
        lines.advance();
        assert_eq!(lines.current().unwrap().text(), "two");
        assert_eq!(lines.current().unwrap().offset(), 4);
        lines.advance();
        assert_eq!(lines.current().unwrap().text(), "three");
        lines.advance();
        assert_eq!(lines.current(), None);
    }

    #[test]
    fn test_windows_and_mac_line_endings() {
        let lines = LineSequence::new("a\r\nb\rc");
        let collected: Vec<&str> = {
            let mut seq = lines;
            let mut out = Vec::new();
            while let Some(line) = seq.current() {
                out.push(line.text());
                seq.advance();
            }
            out
        };
        assert_eq!(collected, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_offsets_with_crlf() {
        let mut lines = LineSequence::new("ab\r\ncd");
        assert_eq!(lines.current().unwrap().offset(), 0);
        lines.advance();
        assert_eq!(lines.current().unwrap().offset(), 4);
    }

    #[test]
    fn test_lookahead_does_not_advance() {
        let lines = LineSequence::new("x\ny");
        assert_eq!(lines.lookahead().unwrap().text(), "y");
        assert_eq!(lines.current().unwrap().text(), "x");
    }

    #[test]
    fn test_empty_and_blank_lines() {
        let mut lines = LineSequence::new("a\n\nb");
        lines.advance();
        assert!(lines.current().unwrap().is_blank());
        assert_eq!(lines.current().unwrap().text(), "");
    }

    #[test]
    fn test_trailing_newline_produces_no_extra_line() {
        let mut lines = LineSequence::new("a\n");
        assert_eq!(lines.current().unwrap().text(), "a");
        lines.advance();
        assert_eq!(lines.current(), None);
    }
}
