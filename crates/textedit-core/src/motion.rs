//! Position Algebra
//!
//! Pure functions mapping a [`Position`] and a [`TextBuffer`] to another position. None of them
//! mutate the buffer, and all of them return positions inside
//! `[to_start_of_buffer, to_end_of_buffer]`.
//!
//! Except for [`clamp`] and [`clamp_signed`], the input position must be valid.

use crate::buffer::TextBuffer;
use crate::position::{CursorIter, Direction, Position};

/// Coarse character classification used by the word motions.
///
/// `_` is punctuation here, unlike in whole-word search (see
/// [`SearchOptions::whole_word`](crate::SearchOptions::whole_word)).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharClass {
    /// Whitespace, line breaks included.
    Whitespace,
    /// Anything that is neither whitespace nor alphanumeric.
    Punctuation,
    /// Letters and digits.
    Alphanumeric,
}

impl CharClass {
    /// Classify `c`.
    pub fn of(c: char) -> Self {
        if c.is_whitespace() {
            Self::Whitespace
        } else if c.is_alphanumeric() {
            Self::Alphanumeric
        } else {
            Self::Punctuation
        }
    }

    fn is_alnum(self) -> bool {
        self == Self::Alphanumeric
    }
}

fn last_col(buffer: &TextBuffer, line: usize) -> usize {
    buffer.line_len(line) - 1
}

/// Clamp `pos` into the buffer.
pub fn clamp(buffer: &TextBuffer, pos: Position) -> Position {
    let line = i64::try_from(pos.line).unwrap_or(i64::MAX);
    let col = i64::try_from(pos.col).unwrap_or(i64::MAX);
    clamp_signed(buffer, line, col)
}

/// Clamp possibly negative coordinates into the buffer.
///
/// The line is clamped first: a negative line yields `(0, 0)`, a line past the end yields the
/// last column of the last line. The column is then clamped into the resulting line on its own.
pub fn clamp_signed(buffer: &TextBuffer, line: i64, col: i64) -> Position {
    let last_line = buffer.line_count() - 1;
    let (line, col) = if line < 0 {
        (0, 0)
    } else if line as u64 > last_line as u64 {
        (last_line, last_col(buffer, last_line) as i64)
    } else {
        (line as usize, col)
    };

    let max_col = last_col(buffer, line);
    let col = if col < 0 {
        0
    } else {
        (col as u64).min(max_col as u64) as usize
    };
    Position::new(line, col)
}

/// Move one character in `dir`.
///
/// Past either end of the line, the position moves to the boundary column of the adjacent line
/// when `can_switch_lines` is set and such a line exists; otherwise it stays clamped in place.
pub fn advance_char(
    buffer: &TextBuffer,
    pos: Position,
    dir: Direction,
    can_switch_lines: bool,
) -> Position {
    match dir {
        Direction::Forward => {
            if pos.col < last_col(buffer, pos.line) {
                Position::new(pos.line, pos.col + 1)
            } else if can_switch_lines && pos.line + 1 < buffer.line_count() {
                Position::new(pos.line + 1, 0)
            } else {
                Position::new(pos.line, last_col(buffer, pos.line))
            }
        }
        Direction::Backward => {
            if pos.col > 0 {
                Position::new(pos.line, pos.col - 1)
            } else if can_switch_lines && pos.line > 0 {
                Position::new(pos.line - 1, last_col(buffer, pos.line - 1))
            } else {
                Position::new(pos.line, 0)
            }
        }
    }
}

/// Move one line in `dir`, keeping the column where the destination line allows it.
///
/// On the first line moving backward goes to column 0; on the last line moving forward goes to
/// the end of the line.
pub fn advance_line(buffer: &TextBuffer, pos: Position, dir: Direction) -> Position {
    match dir {
        Direction::Forward if pos.line + 1 < buffer.line_count() => {
            let line = pos.line + 1;
            Position::new(line, pos.col.min(last_col(buffer, line)))
        }
        Direction::Forward => to_end_of_line(buffer, pos),
        Direction::Backward if pos.line > 0 => {
            let line = pos.line - 1;
            Position::new(line, pos.col.min(last_col(buffer, line)))
        }
        Direction::Backward => to_start_of_line(buffer, pos),
    }
}

/// First character of the buffer.
pub fn to_start_of_buffer(_buffer: &TextBuffer) -> Position {
    Position::new(0, 0)
}

/// Line break of the last line.
pub fn to_end_of_buffer(buffer: &TextBuffer) -> Position {
    let line = buffer.line_count() - 1;
    Position::new(line, last_col(buffer, line))
}

/// Column 0 of the current line.
pub fn to_start_of_line(_buffer: &TextBuffer, pos: Position) -> Position {
    Position::new(pos.line, 0)
}

/// Line break of the current line.
pub fn to_end_of_line(buffer: &TextBuffer, pos: Position) -> Position {
    Position::new(pos.line, last_col(buffer, pos.line))
}

/// First non-blank column of the line, or column 0 if the cursor is already at or before it.
pub fn to_indent_or_start_of_line(buffer: &TextBuffer, pos: Position) -> Position {
    let indent = buffer
        .line(pos.line)
        .indent_len()
        .min(last_col(buffer, pos.line));
    if pos.col <= indent {
        Position::new(pos.line, 0)
    } else {
        Position::new(pos.line, indent)
    }
}

/// Start of the next word: the first alphanumeric character preceded by a non-alphanumeric one,
/// looking past the character under the cursor.
pub fn to_next_start_of_word(buffer: &TextBuffer, pos: Position) -> Position {
    let mut it = CursorIter::new(buffer, pos);
    let mut prev = CharClass::of(it.get());
    while it.move_next() {
        let class = CharClass::of(it.get());
        if !prev.is_alnum() && class.is_alnum() {
            return it.pos();
        }
        prev = class;
    }
    to_end_of_buffer(buffer)
}

/// End of the next word: the first non-alphanumeric character preceded by an alphanumeric one,
/// looking past the character under the cursor.
pub fn to_next_end_of_word(buffer: &TextBuffer, pos: Position) -> Position {
    let mut it = CursorIter::new(buffer, pos);
    let mut prev = CharClass::of(it.get());
    while it.move_next() {
        let class = CharClass::of(it.get());
        if prev.is_alnum() && !class.is_alnum() {
            return it.pos();
        }
        prev = class;
    }
    to_end_of_buffer(buffer)
}

/// Start of the previous word: scanning backward from before the cursor, the first alphanumeric
/// character whose predecessor is not alphanumeric.
pub fn to_prev_start_of_word(buffer: &TextBuffer, pos: Position) -> Position {
    let mut it = CursorIter::new(buffer, pos);
    while it.move_prev() {
        if !CharClass::of(it.get()).is_alnum() {
            continue;
        }
        let mut before = it.clone();
        if !before.move_prev() || !CharClass::of(before.get()).is_alnum() {
            return it.pos();
        }
    }
    to_start_of_buffer(buffer)
}

/// End of the previous word: scanning backward from before the cursor, the first
/// non-alphanumeric character whose predecessor is alphanumeric.
pub fn to_prev_end_of_word(buffer: &TextBuffer, pos: Position) -> Position {
    let mut it = CursorIter::new(buffer, pos);
    while it.move_prev() {
        if CharClass::of(it.get()).is_alnum() {
            continue;
        }
        let mut before = it.clone();
        if before.move_prev() && CharClass::of(before.get()).is_alnum() {
            return it.pos();
        }
    }
    to_start_of_buffer(buffer)
}

/// Start of the next paragraph: the first line after the cursor's line that is not blank and
/// follows a blank line.
pub fn to_next_start_of_paragraph(buffer: &TextBuffer, pos: Position) -> Position {
    let mut line = pos.line + 1;
    while line < buffer.line_count() {
        if buffer.line(line - 1).is_blank() && !buffer.line(line).is_blank() {
            return Position::new(line, 0);
        }
        line += 1;
    }
    to_end_of_buffer(buffer)
}

/// Start of the previous paragraph: scanning lines above the cursor down to line 1, the first
/// line that is not blank and follows a blank line.
pub fn to_prev_start_of_paragraph(buffer: &TextBuffer, pos: Position) -> Position {
    let mut line = pos.line;
    while line > 1 {
        line -= 1;
        if buffer.line(line - 1).is_blank() && !buffer.line(line).is_blank() {
            return Position::new(line, 0);
        }
    }
    to_start_of_buffer(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_class() {
        assert_eq!(CharClass::of(' '), CharClass::Whitespace);
        assert_eq!(CharClass::of('\n'), CharClass::Whitespace);
        assert_eq!(CharClass::of('x'), CharClass::Alphanumeric);
        assert_eq!(CharClass::of('7'), CharClass::Alphanumeric);
        assert_eq!(CharClass::of('('), CharClass::Punctuation);
        assert_eq!(CharClass::of('_'), CharClass::Punctuation);
    }

    #[test]
    fn test_clamp_line_and_column_separately() {
        let buffer = TextBuffer::from_lines(["abc", "de"]);
        assert_eq!(clamp_signed(&buffer, -1, 2), Position::new(0, 0));
        assert_eq!(clamp_signed(&buffer, 7, 0), Position::new(1, 2));
        assert_eq!(clamp_signed(&buffer, 0, -4), Position::new(0, 0));
        assert_eq!(clamp_signed(&buffer, 0, 10), Position::new(0, 3));
        assert_eq!(clamp(&buffer, Position::new(1, 1)), Position::new(1, 1));
    }

    #[test]
    fn test_prev_start_of_word_at_buffer_start() {
        let buffer = TextBuffer::from_lines(["word here"]);
        assert_eq!(
            to_prev_start_of_word(&buffer, Position::new(0, 3)),
            Position::new(0, 0)
        );
    }
}
