//! Positions, selections and the bidirectional character iterator.

use crate::buffer::TextBuffer;
use crate::line::LINE_BREAK;
use std::cmp::Ordering;

/// Position coordinates (line and column numbers)
///
/// A valid position satisfies `line < line_count` and `col < line_len(line)`: it may point at
/// the trailing line break of a line, but never past it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based column in characters within the line.
    pub col: usize,
}

impl Position {
    /// Create a new position.
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }

    /// The position right after `text` once it has been inserted at `self`.
    pub fn advanced_over(self, text: &str) -> Position {
        let mut pos = self;
        for c in text.chars() {
            if c == LINE_BREAK {
                pos.line += 1;
                pos.col = 0;
            } else {
                pos.col += 1;
            }
        }
        pos
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> Ordering {
        self.line
            .cmp(&other.line)
            .then_with(|| self.col.cmp(&other.col))
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Direction of a motion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Towards the end of the buffer.
    Forward,
    /// Towards the start of the buffer.
    Backward,
}

/// Ordered `(start, end)` bounds of the selection spanned by `cursor` and `mark`.
///
/// Returns `None` when no mark is set.
pub fn selection_bounds(cursor: Position, mark: Option<Position>) -> Option<(Position, Position)> {
    mark.map(|mark| (cursor.min(mark), cursor.max(mark)))
}

/// A cursor that walks a buffer one character at a time, across line boundaries.
#[derive(Debug, Clone)]
pub struct CursorIter<'a> {
    buffer: &'a TextBuffer,
    pos: Position,
}

impl<'a> CursorIter<'a> {
    /// Create an iterator at `pos`, which must be a valid position in `buffer`.
    pub fn new(buffer: &'a TextBuffer, pos: Position) -> Self {
        debug_assert!(buffer.is_valid_position(pos), "invalid position {pos:?}");
        Self { buffer, pos }
    }

    /// Current position.
    pub fn pos(&self) -> Position {
        self.pos
    }

    /// Character under the iterator.
    pub fn get(&self) -> char {
        self.buffer.get_char(self.pos)
    }

    /// Step one character forward. Returns `false` without moving at the end of the buffer.
    pub fn move_next(&mut self) -> bool {
        if self.pos.col + 1 < self.buffer.line_len(self.pos.line) {
            self.pos.col += 1;
            true
        } else if self.pos.line + 1 < self.buffer.line_count() {
            self.pos = Position::new(self.pos.line + 1, 0);
            true
        } else {
            false
        }
    }

    /// Step one character backward. Returns `false` without moving at the start of the buffer.
    pub fn move_prev(&mut self) -> bool {
        if self.pos.col > 0 {
            self.pos.col -= 1;
            true
        } else if self.pos.line > 0 {
            let line = self.pos.line - 1;
            self.pos = Position::new(line, self.buffer.line_len(line) - 1);
            true
        } else {
            false
        }
    }
}
