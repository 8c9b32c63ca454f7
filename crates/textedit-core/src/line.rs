//! Line Store
//!
//! A [`Line`] is a single editable line of text stored as a growable array of `char`s
//! (Unicode scalar values). Columns used by every operation in this crate are indices into
//! that array.
//!
//! Inside a valid [`TextBuffer`](crate::TextBuffer) every line ends with [`LINE_BREAK`], so a
//! line's length is always at least 1. The Line Store itself does not enforce that: it is a
//! low-level component trusted by the buffer to pass valid indices. Out-of-range indices are
//! programming errors and panic.

use std::fmt;

/// The line-break character terminating every line of a buffer.
pub const LINE_BREAK: char = '\n';

/// A single line of text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Line {
    chars: Vec<char>,
}

impl Line {
    /// Create a line holding exactly the characters of `text`.
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
        }
    }

    /// Create a line holding `count` characters of `text`, starting at character `start`.
    pub fn from_range(text: &str, start: usize, count: usize) -> Self {
        let chars: Vec<char> = text.chars().skip(start).take(count).collect();
        assert_eq!(
            chars.len(),
            count,
            "range {start}+{count} exceeds source text length"
        );
        Self { chars }
    }

    /// Create a line from an owned character vector.
    pub fn from_chars(chars: Vec<char>) -> Self {
        Self { chars }
    }

    /// Create the minimal valid line: a lone line break.
    pub fn line_break() -> Self {
        Self {
            chars: vec![LINE_BREAK],
        }
    }

    /// Copy characters `start..end` of `source` into a new line.
    ///
    /// `end = None` copies through the end of `source`.
    pub fn copy(source: &Line, start: usize, end: Option<usize>) -> Self {
        let end = end.unwrap_or(source.len());
        assert!(
            start <= end && end <= source.len(),
            "copy range {start}..{end} out of bounds for line of length {}",
            source.len()
        );
        Self {
            chars: source.chars[start..end].to_vec(),
        }
    }

    /// Number of characters, including the trailing line break if present.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Returns `true` if the line holds no characters at all.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// The raw characters of the line.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Character at `index`.
    pub fn char_at(&self, index: usize) -> char {
        assert!(
            index < self.len(),
            "index {index} out of bounds for line of length {}",
            self.len()
        );
        self.chars[index]
    }

    /// Returns `true` if the last character is [`LINE_BREAK`].
    pub fn ends_with_break(&self) -> bool {
        self.chars.last() == Some(&LINE_BREAK)
    }

    /// Line text without the trailing line break.
    pub fn content(&self) -> String {
        let end = if self.ends_with_break() {
            self.len() - 1
        } else {
            self.len()
        };
        self.chars[..end].iter().collect()
    }

    /// Returns `true` if the line holds only whitespace (line break included).
    pub fn is_blank(&self) -> bool {
        self.chars.iter().all(|c| c.is_whitespace())
    }

    /// Number of leading space/tab characters.
    pub fn indent_len(&self) -> usize {
        self.chars
            .iter()
            .take_while(|c| **c == ' ' || **c == '\t')
            .count()
    }

    /// Resize the line to `new_len` characters, padding with `fill` when growing.
    pub fn resize(&mut self, new_len: usize, fill: char) {
        self.chars.resize(new_len, fill);
    }

    /// Insert `c` before `index` (`index == len` appends).
    pub fn insert_char(&mut self, c: char, index: usize) {
        assert!(
            index <= self.len(),
            "insert index {index} out of bounds for line of length {}",
            self.len()
        );
        self.chars.insert(index, c);
    }

    /// Remove and return the character at `index`.
    pub fn remove_char(&mut self, index: usize) -> char {
        assert!(
            index < self.len(),
            "remove index {index} out of bounds for line of length {}",
            self.len()
        );
        self.chars.remove(index)
    }

    /// Insert `text` before `index`.
    pub fn insert_range(&mut self, index: usize, text: &[char]) {
        assert!(
            index <= self.len(),
            "insert index {index} out of bounds for line of length {}",
            self.len()
        );
        self.chars.splice(index..index, text.iter().copied());
    }

    /// Remove `count` characters starting at `index`, returning them.
    pub fn remove_range(&mut self, index: usize, count: usize) -> Vec<char> {
        assert!(
            index.checked_add(count).is_some_and(|end| end <= self.len()),
            "remove range {index}+{count} out of bounds for line of length {}",
            self.len()
        );
        self.chars.drain(index..index + count).collect()
    }

    /// Append `text` after the last character.
    pub fn append(&mut self, text: &[char]) {
        self.chars.extend_from_slice(text);
    }
}

impl fmt::Display for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            write!(f, "{c}")?;
        }
        Ok(())
    }
}

impl From<&str> for Line {
    fn from(text: &str) -> Self {
        Self::new(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_make_and_content() {
        let line = Line::new("hello\n");
        assert_eq!(line.len(), 6);
        assert!(line.ends_with_break());
        assert_eq!(line.content(), "hello");
        assert_eq!(line.to_string(), "hello\n");
    }

    #[test]
    fn test_from_range() {
        let line = Line::from_range("abcdef", 2, 3);
        assert_eq!(line.to_string(), "cde");
    }

    #[test]
    #[should_panic]
    fn test_from_range_past_end_panics() {
        Line::from_range("abc", 2, 5);
    }

    #[test]
    fn test_copy_to_end() {
        let source = Line::new("hello world\n");
        assert_eq!(Line::copy(&source, 6, None).to_string(), "world\n");
        assert_eq!(Line::copy(&source, 0, Some(5)).to_string(), "hello");
    }

    #[test]
    fn test_insert_and_remove_char() {
        let mut line = Line::new("ac\n");
        line.insert_char('b', 1);
        assert_eq!(line.to_string(), "abc\n");
        assert_eq!(line.remove_char(0), 'a');
        assert_eq!(line.to_string(), "bc\n");
    }

    #[test]
    fn test_insert_char_at_len_appends() {
        let mut line = Line::new("ab");
        line.insert_char('c', 2);
        assert_eq!(line.to_string(), "abc");
    }

    #[test]
    #[should_panic]
    fn test_remove_char_at_len_panics() {
        let mut line = Line::new("ab");
        line.remove_char(2);
    }

    #[test]
    fn test_insert_and_remove_range() {
        let mut line = Line::new("ad\n");
        let text: Vec<char> = "bc".chars().collect();
        line.insert_range(1, &text);
        assert_eq!(line.to_string(), "abcd\n");

        let removed = line.remove_range(1, 2);
        assert_eq!(removed, vec!['b', 'c']);
        assert_eq!(line.to_string(), "ad\n");
    }

    #[test]
    #[should_panic]
    fn test_remove_range_overflow_panics() {
        let mut line = Line::new("abc");
        line.remove_range(2, 2);
    }

    #[test]
    fn test_resize() {
        let mut line = Line::new("abc");
        line.resize(5, ' ');
        assert_eq!(line.to_string(), "abc  ");
        line.resize(1, ' ');
        assert_eq!(line.to_string(), "a");
    }

    #[test]
    fn test_blank_and_indent() {
        assert!(Line::new(" \t\n").is_blank());
        assert!(Line::line_break().is_blank());
        assert!(!Line::new("  x\n").is_blank());
        assert_eq!(Line::new("  \tx\n").indent_len(), 3);
    }

    #[test]
    fn test_multibyte_columns_are_chars() {
        let mut line = Line::new("你好\n");
        assert_eq!(line.len(), 3);
        line.insert_char('👋', 1);
        assert_eq!(line.content(), "你👋好");
    }
}
