//! Buffer Store
//!
//! [`TextBuffer`] is the whole document: an ordered `Vec` of [`Line`]s, each terminated by
//! [`LINE_BREAK`]. It is deliberately a plain array of lines rather than a rope or piece table.
//!
//! Invariants maintained by every operation:
//!
//! - `line_count() >= 1`; an empty document is a single line holding only the line break.
//! - every line ends with the line break, the last one included.
//! - inserting or removing one line moves the other lines without touching their storage.
//!
//! Positions passed to non-clamping operations must be valid (see [`Position`]); violating that
//! is a programming error and panics.

use crate::line::{LINE_BREAK, Line};
use crate::position::Position;
use crate::search::{SearchError, SearchOptions, find_next, find_prev};

/// A line-oriented, mutable text document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBuffer {
    lines: Vec<Line>,
}

impl Default for TextBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl TextBuffer {
    /// Create an empty document (one line containing only the line break).
    pub fn empty() -> Self {
        Self {
            lines: vec![Line::line_break()],
        }
    }

    /// Create a document with one line per entry.
    ///
    /// A trailing line break on an entry is optional; one is appended when missing. Entries must
    /// not contain interior line breaks. No entries yields an empty document.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut out: Vec<Line> = Vec::new();
        for text in lines {
            let text = text.as_ref();
            let body = text.strip_suffix(LINE_BREAK).unwrap_or(text);
            assert!(
                !body.contains(LINE_BREAK),
                "line entry contains an interior line break: {body:?}"
            );
            let mut line = Line::new(body);
            line.insert_char(LINE_BREAK, line.len());
            out.push(line);
        }

        if out.is_empty() {
            return Self::empty();
        }
        Self { lines: out }
    }

    /// Create a document by splitting `text` on line breaks.
    ///
    /// The last line always ends with a line break, even if `text` does not.
    pub fn from_text(text: &str) -> Self {
        let mut lines: Vec<Line> = text.split_inclusive(LINE_BREAK).map(Line::new).collect();

        match lines.last_mut() {
            None => return Self::empty(),
            Some(last) if !last.ends_with_break() => last.insert_char(LINE_BREAK, last.len()),
            Some(_) => {}
        }
        Self { lines }
    }

    // ==================== Queries ====================

    /// Number of lines (always at least 1).
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// All lines in order.
    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    /// The line at `index`.
    pub fn line(&self, index: usize) -> &Line {
        &self.lines[index]
    }

    /// Length of line `index` in characters, including its line break.
    pub fn line_len(&self, index: usize) -> usize {
        self.lines[index].len()
    }

    /// Text of line `index` without its line break.
    pub fn line_content(&self, index: usize) -> String {
        self.lines[index].content()
    }

    /// The whole document as a string (every line including its line break).
    pub fn text(&self) -> String {
        let mut out = String::with_capacity(self.char_count());
        for line in &self.lines {
            out.extend(line.chars());
        }
        out
    }

    /// Total number of characters, line breaks included.
    pub fn char_count(&self) -> usize {
        self.lines.iter().map(Line::len).sum()
    }

    /// Returns `true` if `pos` addresses a character of this buffer.
    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.line < self.line_count() && pos.col < self.line_len(pos.line)
    }

    /// Character at `pos`.
    pub fn get_char(&self, pos: Position) -> char {
        self.assert_valid(pos);
        self.lines[pos.line].char_at(pos.col)
    }

    /// Character offset of `pos` from the start of the document.
    pub fn offset_of(&self, pos: Position) -> usize {
        self.assert_valid(pos);
        self.lines[..pos.line].iter().map(Line::len).sum::<usize>() + pos.col
    }

    /// Position of the character at `offset`, clamped to the last character of the document.
    pub fn position_at(&self, offset: usize) -> Position {
        let mut remaining = offset;
        for (index, line) in self.lines.iter().enumerate() {
            if remaining < line.len() {
                return Position::new(index, remaining);
            }
            remaining -= line.len();
        }
        let last = self.line_count() - 1;
        Position::new(last, self.line_len(last) - 1)
    }

    /// Copy of the text in `[start, end)`.
    pub fn extract_range(&self, start: Position, end: Position) -> String {
        self.assert_range(start, end);

        if start.line == end.line {
            return self.lines[start.line].chars()[start.col..end.col]
                .iter()
                .collect();
        }

        let mut out = String::new();
        out.extend(&self.lines[start.line].chars()[start.col..]);
        for line in &self.lines[start.line + 1..end.line] {
            out.extend(line.chars());
        }
        out.extend(&self.lines[end.line].chars()[..end.col]);
        out
    }

    // ==================== Line-level mutation ====================

    /// Append `line` after the last line.
    pub fn append_line(&mut self, line: Line) {
        assert!(line.ends_with_break(), "appended line must end with a line break");
        self.lines.push(line);
    }

    /// Insert `line` so that it becomes line `index` (`index == line_count` appends).
    pub fn insert_line(&mut self, line: Line, index: usize) {
        assert!(
            index <= self.line_count(),
            "insert line index {index} out of bounds ({} lines)",
            self.line_count()
        );
        assert!(line.ends_with_break(), "inserted line must end with a line break");
        self.lines.insert(index, line);
    }

    /// Remove and return line `index`.
    ///
    /// Removing the only line leaves a single line holding just the line break.
    pub fn remove_line(&mut self, index: usize) -> Line {
        assert!(
            index < self.line_count(),
            "remove line index {index} out of bounds ({} lines)",
            self.line_count()
        );
        if self.line_count() == 1 {
            return std::mem::replace(&mut self.lines[0], Line::line_break());
        }
        self.lines.remove(index)
    }

    /// Split line `pos.line` at `pos.col`.
    ///
    /// The suffix starting at `pos.col` (original line break included) becomes a new line right
    /// after; the prefix gets a fresh line break. Returns the start of the new line.
    pub fn split_line_at(&mut self, pos: Position) -> Position {
        self.assert_valid(pos);
        let line = &mut self.lines[pos.line];
        let tail = line.remove_range(pos.col, line.len() - pos.col);
        line.insert_char(LINE_BREAK, pos.col);
        self.lines.insert(pos.line + 1, Line::from_chars(tail));
        Position::new(pos.line + 1, 0)
    }

    // ==================== Character-level mutation ====================

    /// Insert `c` at `pos`, returning the position right after it.
    ///
    /// Inserting a line break splits the line.
    pub fn insert_char(&mut self, c: char, pos: Position) -> Position {
        if c == LINE_BREAK {
            return self.split_line_at(pos);
        }
        self.assert_valid(pos);
        self.lines[pos.line].insert_char(c, pos.col);
        Position::new(pos.line, pos.col + 1)
    }

    /// Remove the character at `pos`.
    ///
    /// Removing a line break joins the next line onto this one. At the line break of the very
    /// last line there is nothing to join with: nothing happens and `None` is returned.
    pub fn remove_char(&mut self, pos: Position) -> Option<char> {
        let c = self.get_char(pos);
        if c != LINE_BREAK {
            return Some(self.lines[pos.line].remove_char(pos.col));
        }

        if pos.line + 1 == self.line_count() {
            return None;
        }
        let next = self.lines.remove(pos.line + 1);
        let line = &mut self.lines[pos.line];
        line.remove_char(pos.col);
        line.append(next.chars());
        Some(LINE_BREAK)
    }

    // ==================== Range mutation ====================

    /// Insert `text` at `pos`, returning the position right after the last inserted character.
    pub fn insert_range(&mut self, text: &str, pos: Position) -> Position {
        self.assert_valid(pos);
        let chars: Vec<char> = text.chars().collect();
        let breaks = chars.iter().filter(|c| **c == LINE_BREAK).count();

        if breaks == 0 {
            self.lines[pos.line].insert_range(pos.col, &chars);
            return Position::new(pos.line, pos.col + chars.len());
        }

        self.split_line_at(pos);
        let mut segments = chars.split(|c| *c == LINE_BREAK);

        if let Some(first) = segments.next() {
            let head = &mut self.lines[pos.line];
            head.insert_range(head.len() - 1, first);
        }

        let mut line_index = pos.line + 1;
        let mut end = Position::new(line_index, 0);
        for (i, segment) in segments.enumerate() {
            if i + 1 == breaks {
                self.lines[line_index].insert_range(0, segment);
                end = Position::new(line_index, segment.len());
            } else {
                let mut line = Line::from_chars(segment.to_vec());
                line.insert_char(LINE_BREAK, line.len());
                self.lines.insert(line_index, line);
                line_index += 1;
            }
        }
        end
    }

    /// Remove the text in `[start, end)`, returning it.
    pub fn remove_range(&mut self, start: Position, end: Position) -> String {
        self.assert_range(start, end);

        if start.line == end.line {
            return self.lines[start.line]
                .remove_range(start.col, end.col - start.col)
                .into_iter()
                .collect();
        }

        let removed = self.extract_range(start, end);
        let surviving = self.lines[end.line].chars()[end.col..].to_vec();

        let head = &mut self.lines[start.line];
        head.remove_range(start.col, head.len() - start.col);
        head.append(&surviving);

        for _ in start.line + 1..=end.line {
            self.remove_line(start.line + 1);
        }
        removed
    }

    // ==================== Search ====================

    /// Find the next occurrence of `query` after `from`, wrapping around to the buffer start.
    ///
    /// Returns the position of the first character of the match.
    pub fn search_next(&self, query: &str, from: Position) -> Option<Position> {
        self.search_next_with(query, from, SearchOptions::default())
            .ok()
            .flatten()
            .map(|(start, _)| start)
    }

    /// Like [`TextBuffer::search_next`], with explicit options; returns `[start, end)` of the
    /// match.
    ///
    /// A match that ends on the final line break yields an `end` equal to `start` of the next
    /// line, which does not exist; such an `end` is clamped to the last character.
    pub fn search_next_with(
        &self,
        query: &str,
        from: Position,
        options: SearchOptions,
    ) -> Result<Option<(Position, Position)>, SearchError> {
        let text = self.text();
        let from_offset = self.offset_of(from);

        let found = match find_next(&text, query, options, from_offset + 1)? {
            Some(m) => Some(m),
            None => find_next(&text, query, options, 0)?.filter(|m| m.start <= from_offset),
        };
        Ok(found.map(|m| (self.position_at(m.start), self.position_at(m.end))))
    }

    /// Find the closest occurrence of `query` that starts before `from`, wrapping around to the
    /// buffer end.
    pub fn search_prev_with(
        &self,
        query: &str,
        from: Position,
        options: SearchOptions,
    ) -> Result<Option<(Position, Position)>, SearchError> {
        let text = self.text();
        let from_offset = self.offset_of(from);

        let found = match find_prev(&text, query, options, from_offset)? {
            Some(m) if m.start < from_offset => Some(m),
            _ => find_prev(&text, query, options, text.chars().count())?
                .filter(|m| m.start >= from_offset),
        };
        Ok(found.map(|m| (self.position_at(m.start), self.position_at(m.end))))
    }

    fn assert_valid(&self, pos: Position) {
        assert!(
            self.is_valid_position(pos),
            "position {pos:?} out of bounds ({} lines)",
            self.line_count()
        );
    }

    fn assert_range(&self, start: Position, end: Position) {
        self.assert_valid(start);
        self.assert_valid(end);
        assert!(start <= end, "range start {start:?} is after end {end:?}");
    }
}
