//! History-aware mutation facade.
//!
//! [`Document`] owns a [`TextBuffer`], its [`History`], the cursor and the mark. Every mutation
//! made through it is applied to the buffer and recorded as a [`Delta`] in the open command, so
//! it can be undone.
//!
//! There are two layers:
//!
//! - **Primitives** ([`Document::insert_char`], [`Document::remove_range`], ...) mirror the
//!   [`TextBuffer`] operations. They require an open command: the caller brackets them with
//!   [`History::begin_command`] (or a variant) and [`History::commit_command`], reachable via
//!   [`Document::history_mut`].
//! - **Editing actions** ([`Document::type_char`], [`Document::paste`], [`Document::undo`], ...)
//!   open and commit their own commands and implement the coalescing rules for interactive
//!   typing and deletion.
//!
//! # Example
//!
//! ```rust
//! use textedit_core::Document;
//!
//! let mut doc = Document::new("");
//! for c in "hello world".chars() {
//!     doc.type_char(c);
//! }
//! assert_eq!(doc.text(), "hello world\n");
//!
//! // "world" was typed as its own command.
//! doc.undo();
//! assert_eq!(doc.text(), "hello \n");
//!
//! doc.redo();
//! assert_eq!(doc.text(), "hello world\n");
//! ```

use crate::buffer::TextBuffer;
use crate::config::{EditContext, EditorConfig, TabKeyBehavior};
use crate::delta::Delta;
use crate::history::{History, RunningKind};
use crate::line::{LINE_BREAK, Line};
use crate::line_ending::LineEnding;
use crate::motion::{self, CharClass};
use crate::persist::{self, LoadError};
use crate::position::{Direction, Position, selection_bounds};
use crate::search::SearchError;
use std::io::{self, Read, Write};
use tracing::debug;

/// A document: buffer, undo history, cursor and mark.
#[derive(Debug)]
pub struct Document {
    buffer: TextBuffer,
    history: History,
    cursor: Position,
    mark: Option<Position>,
    config: EditorConfig,
    line_ending: LineEnding,
}

impl Default for Document {
    fn default() -> Self {
        Self::from_buffer(TextBuffer::empty())
    }
}

impl Document {
    /// Create a document from text. CRLF line breaks are normalized and remembered for saving.
    pub fn new(text: &str) -> Self {
        let line_ending = LineEnding::detect_in_text(text);
        let mut doc = Self::from_buffer(TextBuffer::from_text(&LineEnding::normalize(text)));
        doc.line_ending = line_ending;
        doc
    }

    /// Create a document around an existing buffer, with the cursor at the start.
    pub fn from_buffer(buffer: TextBuffer) -> Self {
        Self {
            buffer,
            history: History::new(),
            cursor: Position::default(),
            mark: None,
            config: EditorConfig::default(),
            line_ending: LineEnding::default(),
        }
    }

    /// Replace the configuration.
    pub fn with_config(mut self, config: EditorConfig) -> Self {
        self.config = config;
        self
    }

    /// Load a document from `reader`.
    pub fn load<R: Read>(reader: R) -> Result<Self, LoadError> {
        let (buffer, line_ending) = persist::read_buffer(reader)?;
        let mut doc = Self::from_buffer(buffer);
        doc.line_ending = line_ending;
        Ok(doc)
    }

    /// Write the document to `writer` using its line ending.
    pub fn save<W: Write>(&self, writer: W) -> io::Result<()> {
        persist::write_buffer(&self.buffer, self.line_ending, writer)
    }

    // ==================== Accessors ====================

    /// The underlying buffer.
    pub fn buffer(&self) -> &TextBuffer {
        &self.buffer
    }

    /// The whole document text.
    pub fn text(&self) -> String {
        self.buffer.text()
    }

    /// The undo history.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// Mutable access to the history, for bracketing the mutation primitives.
    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// Current configuration.
    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    /// Change the configuration.
    pub fn set_config(&mut self, config: EditorConfig) {
        self.config = config;
    }

    /// Line ending used when saving.
    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }

    /// Change the line ending used when saving.
    pub fn set_line_ending(&mut self, line_ending: LineEnding) {
        self.line_ending = line_ending;
    }

    /// Cursor position.
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Mark position, if a selection is active.
    pub fn mark(&self) -> Option<Position> {
        self.mark
    }

    /// Ordered bounds of the active selection.
    pub fn selection(&self) -> Option<(Position, Position)> {
        selection_bounds(self.cursor, self.mark)
    }

    /// Returns `true` if a command can be undone.
    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    /// Returns `true` if an undone command can be redone.
    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    // ==================== Cursor and mark ====================

    /// Move the cursor to `pos`, clamped. Ends any running command.
    pub fn set_cursor(&mut self, pos: Position) {
        self.move_cursor(|_, _| pos);
    }

    /// Move the cursor with a [`motion`](crate::motion) function. Ends any running command.
    ///
    /// ```rust
    /// use textedit_core::{Document, Position, motion};
    ///
    /// let mut doc = Document::new("one two\n");
    /// doc.move_cursor(motion::to_next_start_of_word);
    /// assert_eq!(doc.cursor(), Position::new(0, 4));
    /// ```
    pub fn move_cursor<F>(&mut self, motion: F)
    where
        F: FnOnce(&TextBuffer, Position) -> Position,
    {
        self.history.commit_command();
        let target = motion(&self.buffer, self.cursor);
        self.cursor = motion::clamp(&self.buffer, target);
    }

    /// Start a selection at the cursor.
    pub fn set_mark(&mut self) {
        self.mark = Some(self.cursor);
    }

    /// Drop the selection.
    pub fn clear_mark(&mut self) {
        self.mark = None;
    }

    // ==================== History-aware primitives ====================

    /// Insert `c` at `pos` and record it. Requires an open command.
    pub fn insert_char(&mut self, c: char, pos: Position) -> Position {
        self.require_open_command();
        let end = self.buffer.insert_char(c, pos);
        self.history.add_delta(Delta::InsertChar { pos, ch: c });
        self.clamp_mark();
        end
    }

    /// Remove the character at `pos` and record it. Requires an open command.
    ///
    /// Returns `None` (and records nothing) at the line break of the last line.
    pub fn remove_char(&mut self, pos: Position) -> Option<char> {
        self.require_open_command();
        let ch = self.buffer.remove_char(pos)?;
        self.history.add_delta(Delta::RemoveChar { pos, ch });
        self.clamp_mark();
        Some(ch)
    }

    /// Insert `text` at `pos` and record it. Requires an open command.
    pub fn insert_range(&mut self, text: &str, pos: Position) -> Position {
        self.require_open_command();
        let end = self.buffer.insert_range(text, pos);
        if !text.is_empty() {
            self.history.add_delta(Delta::InsertRange {
                start: pos,
                end,
                text: text.to_string(),
            });
        }
        self.clamp_mark();
        end
    }

    /// Remove `[start, end)` and record it. Requires an open command.
    pub fn remove_range(&mut self, start: Position, end: Position) -> String {
        self.require_open_command();
        let text = self.buffer.remove_range(start, end);
        if !text.is_empty() {
            self.history.add_delta(Delta::RemoveRange {
                start,
                text: text.clone(),
            });
        }
        self.clamp_mark();
        text
    }

    /// Insert `line` as line `index` and record it. Requires an open command.
    pub fn insert_line(&mut self, line: Line, index: usize) {
        self.require_open_command();
        let delta = if index < self.buffer.line_count() {
            let start = Position::new(index, 0);
            let text = line.to_string();
            Delta::InsertRange {
                start,
                end: start.advanced_over(&text),
                text,
            }
        } else {
            let start = motion::to_end_of_buffer(&self.buffer);
            let text = format!("{LINE_BREAK}{}", line.content());
            Delta::InsertRange {
                start,
                end: start.advanced_over(&text),
                text,
            }
        };
        self.buffer.insert_line(line, index);
        self.history.add_delta(delta);
        self.clamp_mark();
    }

    /// Remove line `index` and record it. Requires an open command.
    pub fn remove_line(&mut self, index: usize) -> Line {
        self.require_open_command();
        let line = self.buffer.line(index);
        let delta = if self.buffer.line_count() == 1 {
            let text = line.content();
            (!text.is_empty()).then(|| Delta::RemoveRange {
                start: Position::new(0, 0),
                text,
            })
        } else if index + 1 < self.buffer.line_count() {
            Some(Delta::RemoveRange {
                start: Position::new(index, 0),
                text: line.to_string(),
            })
        } else {
            Some(Delta::RemoveRange {
                start: motion::to_end_of_line(&self.buffer, Position::new(index - 1, 0)),
                text: format!("{LINE_BREAK}{}", line.content()),
            })
        };

        let removed = self.buffer.remove_line(index);
        if let Some(delta) = delta {
            self.history.add_delta(delta);
        }
        self.clamp_mark();
        removed
    }

    /// Split the line at `pos` and record it. Requires an open command.
    pub fn split_line_at(&mut self, pos: Position) -> Position {
        self.require_open_command();
        let next = self.buffer.split_line_at(pos);
        self.history.add_delta(Delta::InsertChar {
            pos,
            ch: LINE_BREAK,
        });
        self.clamp_mark();
        next
    }

    /// Keeps the mark inside the buffer after an edit that may have shrunk it.
    fn clamp_mark(&mut self) {
        self.mark = self.mark.map(|mark| motion::clamp(&self.buffer, mark));
    }

    fn require_open_command(&self) {
        assert!(
            self.history.open_command().is_some(),
            "document mutation without an open command"
        );
    }

    // ==================== Editing actions ====================

    /// Type `c` at the cursor.
    ///
    /// Consecutive characters coalesce into one running command, which is committed when a
    /// word character follows a non-word character.
    pub fn type_char(&mut self, c: char) {
        let previous = self
            .history
            .open_command()
            .filter(|command| command.running() == RunningKind::TextInsertion)
            .and_then(|command| command.deltas().last())
            .and_then(Delta::last_inserted_char);
        if let Some(previous) = previous {
            let is_alnum = |ch: char| CharClass::of(ch) == CharClass::Alphanumeric;
            if !is_alnum(previous) && is_alnum(c) {
                self.history.commit_command();
            }
        }

        self.history.begin_running_command(
            self.cursor,
            self.mark,
            "Insert text",
            RunningKind::TextInsertion,
        );
        self.cursor = self.insert_char(c, self.cursor);
    }

    /// Delete the character before the cursor. Returns `false` at the start of the buffer.
    pub fn delete_backward(&mut self) -> bool {
        if self.cursor == motion::to_start_of_buffer(&self.buffer) {
            return false;
        }
        let target = motion::advance_char(&self.buffer, self.cursor, Direction::Backward, true);
        self.begin_deletion();
        self.remove_char(target);
        self.cursor = target;
        true
    }

    /// Delete the character under the cursor. Returns `false` at the end of the buffer.
    pub fn delete_forward(&mut self) -> bool {
        if self.cursor == motion::to_end_of_buffer(&self.buffer) {
            return false;
        }
        self.begin_deletion();
        self.remove_char(self.cursor);
        true
    }

    /// Begin or continue a running deletion; a deleted line break always ends the previous run.
    fn begin_deletion(&mut self) {
        let after_break = self
            .history
            .open_command()
            .filter(|command| command.running() == RunningKind::TextDeletion)
            .and_then(|command| command.deltas().last())
            .is_some_and(Delta::removed_line_break);
        if after_break {
            self.history.commit_command();
        }
        self.history.begin_running_command(
            self.cursor,
            self.mark,
            "Delete text",
            RunningKind::TextDeletion,
        );
    }

    /// Insert a tab (or spaces up to the next tab stop) at the cursor.
    pub fn insert_tab(&mut self) {
        let text = match self.config.tab_key_behavior {
            TabKeyBehavior::Tab => "\t".to_string(),
            TabKeyBehavior::Spaces => {
                let width = self.config.tab_width.max(1);
                " ".repeat(width - self.cursor.col % width)
            }
        };

        let started = self.history.begin_command(self.cursor, self.mark, "Insert tab");
        self.cursor = self.insert_range(&text, self.cursor);
        if started {
            self.history.commit_command();
        }
    }

    /// Delete the selected text.
    ///
    /// Returns `false` if there is no selection. An empty selection only clears the mark and
    /// leaves the history untouched.
    pub fn delete_selection(&mut self) -> bool {
        let Some((start, end)) = self.selection() else {
            return false;
        };
        if start == end {
            self.mark = None;
            return false;
        }

        let started = self
            .history
            .begin_non_interrupt_command(self.cursor, self.mark, "Delete selection");
        self.remove_range(start, end);
        self.cursor = start;
        self.mark = None;
        if started {
            self.history.commit_command();
        }
        true
    }

    /// Copy the selection into `ctx.clipboard`. Returns `false` if there is no selection.
    pub fn copy(&self, ctx: &mut EditContext) -> bool {
        let Some((start, end)) = self.selection() else {
            return false;
        };
        ctx.clipboard = self.buffer.extract_range(start, end);
        true
    }

    /// Move the selection into `ctx.clipboard`. Returns `false` if the selection is missing or
    /// empty; the clipboard is then left alone.
    pub fn cut(&mut self, ctx: &mut EditContext) -> bool {
        match self.selection() {
            Some((start, end)) if start != end => self.copy(ctx) && self.delete_selection(),
            _ => false,
        }
    }

    /// Replace the selection (if any) with `ctx.clipboard`.
    pub fn paste(&mut self, ctx: &EditContext) {
        let text = LineEnding::normalize(&ctx.clipboard);
        if text.is_empty() {
            return;
        }

        let started = self
            .history
            .begin_non_interrupt_command(self.cursor, self.mark, "Paste");
        if let Some((start, end)) = self.selection() {
            self.remove_range(start, end);
            self.cursor = start;
            self.mark = None;
        }
        self.cursor = self.insert_range(&text, self.cursor);
        if started {
            self.history.commit_command();
        }
    }

    /// Replace the leading whitespace of `line` with `width` spaces.
    pub fn reindent_line(&mut self, line: usize, width: usize) {
        let old_indent = self
            .buffer
            .line(line)
            .indent_len()
            .min(self.buffer.line_len(line) - 1);
        let indent = " ".repeat(width);
        let current: String = self.buffer.line(line).chars()[..old_indent].iter().collect();
        if current == indent {
            return;
        }

        let (cursor, mark) = (self.cursor, self.mark);
        let started = self.history.begin_command(cursor, mark, "Reindent");
        if old_indent > 0 {
            self.remove_range(Position::new(line, 0), Position::new(line, old_indent));
        }
        if width > 0 {
            self.insert_range(&indent, Position::new(line, 0));
        }
        if started {
            self.history.commit_command();
        }

        let shift = |pos: Position| {
            if pos.line != line {
                pos
            } else if pos.col < old_indent {
                Position::new(line, width)
            } else {
                Position::new(line, pos.col - old_indent + width)
            }
        };
        self.cursor = motion::clamp(&self.buffer, shift(cursor));
        self.mark = mark.map(|mark| motion::clamp(&self.buffer, shift(mark)));
    }

    /// Search for `query` after the cursor (wrapping) and move the cursor to the match.
    ///
    /// The query is remembered in `ctx` for [`Document::search_again`]. Returns `Ok(false)` if
    /// nothing matched.
    pub fn search_next(&mut self, ctx: &mut EditContext, query: &str) -> Result<bool, SearchError> {
        ctx.last_search = Some(query.to_string());
        let found = self
            .buffer
            .search_next_with(query, self.cursor, self.config.search_options)?;
        let Some((start, _)) = found else {
            return Ok(false);
        };
        self.history.commit_command();
        self.cursor = start;
        self.mark = None;
        Ok(true)
    }

    /// Repeat the previous search. Returns `Ok(false)` if there is none or nothing matched.
    pub fn search_again(&mut self, ctx: &mut EditContext) -> Result<bool, SearchError> {
        match ctx.last_search.clone() {
            Some(query) => self.search_next(ctx, &query),
            None => Ok(false),
        }
    }

    // ==================== Undo / redo ====================

    /// Revert the most recent undoable command. Returns `false` if there is none.
    ///
    /// The revert is itself recorded as an "Undo action" command, and the cursor and mark are
    /// restored to where they were when the reverted command began.
    pub fn undo(&mut self) -> bool {
        self.history.commit_command();
        let Some(target) = self.history.undo_target() else {
            return false;
        };

        let command = self.history.command(target);
        assert!(
            !command.deltas().is_empty(),
            "undo target {:?} has no deltas",
            command.name()
        );
        debug!(name = command.name(), deltas = command.deltas().len(), "undo");
        let inverses: Vec<Delta> = command.deltas().iter().rev().map(Delta::invert).collect();
        let (cursor, mark) = (command.cursor_before(), command.mark_before());

        let started = self
            .history
            .begin_non_reset_command(self.cursor, self.mark, "Undo action");
        debug_assert!(started, "undo command must not join another command");
        for delta in inverses {
            delta.apply(&mut self.buffer);
            self.history.add_delta(delta);
        }
        self.history.commit_command();
        self.history.mark_undone();

        self.cursor = motion::clamp(&self.buffer, cursor);
        self.mark = mark.map(|mark| motion::clamp(&self.buffer, mark));
        true
    }

    /// Replay the most recently undone command. Returns `false` if there is none.
    pub fn redo(&mut self) -> bool {
        self.history.commit_command();
        let Some(target) = self.history.redo_target() else {
            return false;
        };

        let command = self.history.command(target);
        debug!(name = command.name(), deltas = command.deltas().len(), "redo");
        let deltas = command.deltas().to_vec();

        let started = self
            .history
            .begin_non_reset_command(self.cursor, self.mark, "Redo action");
        debug_assert!(started, "redo command must not join another command");
        let mut cursor = self.cursor;
        for delta in deltas {
            cursor = delta.apply(&mut self.buffer);
            self.history.add_delta(delta);
        }
        self.history.commit_command();
        self.history.mark_redone();

        self.cursor = motion::clamp(&self.buffer, cursor);
        self.mark = None;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_str(doc: &mut Document, text: &str) {
        for c in text.chars() {
            doc.type_char(c);
        }
    }

    #[test]
    fn test_typing_coalesces_until_word_start() {
        let mut doc = Document::new("");
        type_str(&mut doc, "ab cd");
        assert_eq!(doc.text(), "ab cd\n");

        assert!(doc.undo());
        assert_eq!(doc.text(), "ab \n");
        assert_eq!(doc.cursor(), Position::new(0, 3));

        assert!(doc.undo());
        assert_eq!(doc.text(), "\n");
        assert_eq!(doc.cursor(), Position::new(0, 0));
        assert!(!doc.undo());
    }

    #[test]
    fn test_deleted_line_break_ends_deletion_run() {
        let mut doc = Document::new("ab\ncd\n");
        doc.set_cursor(Position::new(1, 2));
        assert!(doc.delete_backward());
        assert!(doc.delete_backward());
        assert!(doc.delete_backward());
        assert!(doc.delete_backward());
        assert_eq!(doc.text(), "a\n");

        // "b" was removed after the line break, in its own command.
        assert!(doc.undo());
        assert_eq!(doc.text(), "ab\n");
        assert!(doc.undo());
        assert_eq!(doc.text(), "ab\ncd\n");
        assert_eq!(doc.cursor(), Position::new(1, 2));
    }

    #[test]
    fn test_delete_forward_at_end_is_noop() {
        let mut doc = Document::new("ab");
        doc.set_cursor(Position::new(0, 2));
        assert!(!doc.delete_forward());
        assert!(doc.history().commands().is_empty());
    }

    #[test]
    fn test_insert_and_remove_line_primitives_undo() {
        let mut doc = Document::new("a\nb\n");
        doc.history_mut().begin_command(Position::default(), None, "Lines");
        doc.insert_line(Line::new("z\n"), 2);
        doc.insert_line(Line::new("x\n"), 0);
        let removed = doc.remove_line(2);
        doc.history_mut().commit_command();

        assert_eq!(removed.to_string(), "b\n");
        assert_eq!(doc.text(), "x\na\nz\n");

        assert!(doc.undo());
        assert_eq!(doc.text(), "a\nb\n");
        assert!(doc.redo());
        assert_eq!(doc.text(), "x\na\nz\n");
    }

    #[test]
    fn test_remove_last_line_primitive_undo() {
        let mut doc = Document::new("a\nb\n");
        doc.history_mut().begin_command(Position::default(), None, "Remove");
        doc.remove_line(1);
        doc.remove_line(0);
        doc.history_mut().commit_command();
        assert_eq!(doc.text(), "\n");

        assert!(doc.undo());
        assert_eq!(doc.text(), "a\nb\n");
    }

    #[test]
    #[should_panic(expected = "without an open command")]
    fn test_primitive_without_command_panics() {
        let mut doc = Document::new("a");
        doc.insert_char('x', Position::new(0, 0));
    }

    #[test]
    fn test_insert_tab_spaces_to_tab_stop() {
        let config = EditorConfig {
            tab_key_behavior: TabKeyBehavior::Spaces,
            ..EditorConfig::default()
        };
        let mut doc = Document::new("ab").with_config(config);
        doc.set_cursor(Position::new(0, 1));
        doc.insert_tab();
        assert_eq!(doc.text(), "a   b\n");
        assert_eq!(doc.cursor(), Position::new(0, 4));
    }

    #[test]
    fn test_reindent_line_moves_cursor() {
        let mut doc = Document::new("\t  foo\n");
        doc.set_cursor(Position::new(0, 4));
        doc.reindent_line(0, 4);
        assert_eq!(doc.text(), "    foo\n");
        assert_eq!(doc.cursor(), Position::new(0, 5));

        assert!(doc.undo());
        assert_eq!(doc.text(), "\t  foo\n");
        assert_eq!(doc.cursor(), Position::new(0, 4));
    }
}
