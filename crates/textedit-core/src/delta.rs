//! Edit deltas.
//!
//! A [`Delta`] is one atomic, self-inverting edit record. Each variant carries everything needed
//! to undo it: removals keep the removed text, insertions keep what was inserted and where. No
//! buffer state is consulted when a delta is inverted.

use crate::buffer::TextBuffer;
use crate::position::Position;

/// A single recorded edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Delta {
    /// `ch` was inserted at `pos`.
    InsertChar {
        /// Insertion position.
        pos: Position,
        /// Inserted character.
        ch: char,
    },
    /// `ch` was removed from `pos`.
    RemoveChar {
        /// Position the character was removed from.
        pos: Position,
        /// Removed character.
        ch: char,
    },
    /// `text` was inserted at `start`, ending right before `end`.
    InsertRange {
        /// Insertion position.
        start: Position,
        /// Position right after the last inserted character.
        end: Position,
        /// Inserted text.
        text: String,
    },
    /// `text` was removed starting at `start`.
    RemoveRange {
        /// Start of the removed span.
        start: Position,
        /// Removed text.
        text: String,
    },
}

impl Delta {
    /// The delta that reverts this one.
    pub fn invert(&self) -> Delta {
        match self {
            Delta::InsertChar { pos, ch } => Delta::RemoveChar { pos: *pos, ch: *ch },
            Delta::RemoveChar { pos, ch } => Delta::InsertChar { pos: *pos, ch: *ch },
            Delta::InsertRange { start, text, .. } => Delta::RemoveRange {
                start: *start,
                text: text.clone(),
            },
            Delta::RemoveRange { start, text } => Delta::InsertRange {
                start: *start,
                end: start.advanced_over(text),
                text: text.clone(),
            },
        }
    }

    /// Apply this delta to `buffer`, returning where the cursor ends up.
    ///
    /// The buffer must be in the state the delta was recorded against.
    pub fn apply(&self, buffer: &mut TextBuffer) -> Position {
        match self {
            Delta::InsertChar { pos, ch } => buffer.insert_char(*ch, *pos),
            Delta::RemoveChar { pos, ch } => {
                let removed = buffer.remove_char(*pos);
                debug_assert_eq!(removed, Some(*ch), "replayed removal of a different char");
                *pos
            }
            Delta::InsertRange { start, end, text } => {
                let actual_end = buffer.insert_range(text, *start);
                debug_assert_eq!(actual_end, *end, "replayed insertion ended elsewhere");
                actual_end
            }
            Delta::RemoveRange { start, text } => {
                let removed = buffer.remove_range(*start, start.advanced_over(text));
                debug_assert_eq!(&removed, text, "replayed removal of different text");
                *start
            }
        }
    }

    /// Last character this delta inserted, if it is an insertion.
    pub fn last_inserted_char(&self) -> Option<char> {
        match self {
            Delta::InsertChar { ch, .. } => Some(*ch),
            Delta::InsertRange { text, .. } => text.chars().last(),
            _ => None,
        }
    }

    /// Returns `true` if this delta removed a line break.
    pub fn removed_line_break(&self) -> bool {
        match self {
            Delta::RemoveChar { ch, .. } => *ch == crate::line::LINE_BREAK,
            Delta::RemoveRange { text, .. } => text.contains(crate::line::LINE_BREAK),
            _ => false,
        }
    }
}
