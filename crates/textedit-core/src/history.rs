//! Command history.
//!
//! The [`History`] is an append-only log of [`Command`]s, each an ordered group of
//! [`Delta`]s. Only the most recently appended command can be open (uncommitted) and accept
//! new deltas.
//!
//! # Undo and redo
//!
//! `position` is one past the last command eligible for undo. Undoing replays the inverse of
//! `commands[position - 1]` inside a new "Undo action" command that is itself appended to the
//! log, then moves `position` back by one. Redoing replays `commands[position]` forward and
//! moves `position` forward again. Starting any redo-resetting command moves `position` to
//! the end of the log, so later undos walk back through the undo/redo commands themselves.
//!
//! The replay itself is driven by [`Document`](crate::Document), which owns the buffer.

use crate::delta::Delta;
use crate::position::Position;
use tracing::{debug, trace};

/// Coalescing tag of a command.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RunningKind {
    /// An atomic command that never coalesces.
    #[default]
    None,
    /// Continuous typing.
    TextInsertion,
    /// Continuous deletion (backspace/delete).
    TextDeletion,
}

/// A named, undoable group of deltas.
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    deltas: Vec<Delta>,
    cursor_before: Position,
    mark_before: Option<Position>,
    committed: bool,
    running: RunningKind,
}

impl Command {
    fn new(name: &str, cursor: Position, mark: Option<Position>, running: RunningKind) -> Self {
        Self {
            name: name.to_string(),
            deltas: Vec::new(),
            cursor_before: cursor,
            mark_before: mark,
            committed: false,
            running,
        }
    }

    /// Human-readable name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Recorded deltas, in application order.
    pub fn deltas(&self) -> &[Delta] {
        &self.deltas
    }

    /// Cursor position captured when the command began.
    pub fn cursor_before(&self) -> Position {
        self.cursor_before
    }

    /// Mark captured when the command began.
    pub fn mark_before(&self) -> Option<Position> {
        self.mark_before
    }

    /// Returns `true` once the command no longer accepts deltas.
    pub fn is_committed(&self) -> bool {
        self.committed
    }

    /// Coalescing tag.
    pub fn running(&self) -> RunningKind {
        self.running
    }
}

/// The command log plus the undo position pointer.
#[derive(Debug, Default)]
pub struct History {
    commands: Vec<Command>,
    position: usize,
    redo_depth: usize,
}

impl History {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// All commands, oldest first.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Command at `index`.
    pub fn command(&self, index: usize) -> &Command {
        &self.commands[index]
    }

    /// One past the last command eligible for undo.
    pub fn position(&self) -> usize {
        self.position
    }

    /// The open (uncommitted) command, if any.
    pub fn open_command(&self) -> Option<&Command> {
        self.commands.last().filter(|c| !c.committed)
    }

    /// Returns `true` if a command can be undone.
    pub fn can_undo(&self) -> bool {
        self.position > 0
    }

    /// Returns `true` if an undone command can be redone.
    pub fn can_redo(&self) -> bool {
        self.redo_depth > 0
    }

    /// Begin a command.
    ///
    /// Returns `true` if a new command was started. Returns `false` if an open command exists
    /// and was left open; callers then keep appending to it.
    ///
    /// An open command is interrupted (committed, then replaced by a new one) only when its
    /// running kind is not [`RunningKind::None`], differs from `running`, and `can_interrupt` is
    /// set. With `reset_redo`, pending redo state is discarded and `position` moves past the
    /// new command.
    pub fn start_command(
        &mut self,
        cursor: Position,
        mark: Option<Position>,
        name: &str,
        running: RunningKind,
        can_interrupt: bool,
        reset_redo: bool,
    ) -> bool {
        if let Some(open) = self.open_command() {
            let interrupt =
                open.running != running && open.running != RunningKind::None && can_interrupt;
            if !interrupt {
                return false;
            }
            self.commit_command();
        }

        debug!(name, ?running, "starting command");
        self.commands
            .push(Command::new(name, cursor, mark, running));
        if reset_redo {
            self.position = self.commands.len();
            self.redo_depth = 0;
        }
        true
    }

    /// Begin an ordinary atomic command, interrupting a running one.
    pub fn begin_command(&mut self, cursor: Position, mark: Option<Position>, name: &str) -> bool {
        self.start_command(cursor, mark, name, RunningKind::None, true, true)
    }

    /// Begin (or continue) a running command used for continuous typing or deletion.
    pub fn begin_running_command(
        &mut self,
        cursor: Position,
        mark: Option<Position>,
        name: &str,
        running: RunningKind,
    ) -> bool {
        self.start_command(cursor, mark, name, running, true, true)
    }

    /// Begin an atomic multi-step command without interrupting an open one.
    ///
    /// Returns `false` when a command is already open; the caller's deltas then join it and the
    /// caller must not commit.
    pub fn begin_non_interrupt_command(
        &mut self,
        cursor: Position,
        mark: Option<Position>,
        name: &str,
    ) -> bool {
        self.start_command(cursor, mark, name, RunningKind::None, false, true)
    }

    /// Begin a command that leaves redo state untouched. Used by undo and redo themselves.
    pub fn begin_non_reset_command(
        &mut self,
        cursor: Position,
        mark: Option<Position>,
        name: &str,
    ) -> bool {
        self.start_command(cursor, mark, name, RunningKind::None, false, false)
    }

    /// Append `delta` to the open command.
    ///
    /// # Panics
    ///
    /// Panics if no command is open.
    pub fn add_delta(&mut self, delta: Delta) {
        let command = self
            .commands
            .last_mut()
            .filter(|c| !c.committed)
            .expect("add_delta called without an open command");
        trace!(command = %command.name, ?delta, "recording delta");
        command.deltas.push(delta);
    }

    /// Commit the open command, if any.
    ///
    /// An open command without deltas is dropped instead, so every committed command can be
    /// undone.
    pub fn commit_command(&mut self) {
        let Some(command) = self.commands.last_mut().filter(|c| !c.committed) else {
            return;
        };

        if command.deltas.is_empty() {
            debug!(name = %command.name, "dropping empty command");
            self.commands.pop();
            self.position = self.position.min(self.commands.len());
            return;
        }

        command.committed = true;
        debug!(name = %command.name, deltas = command.deltas.len(), "committed command");
    }

    /// Index of the command the next undo reverts.
    pub fn undo_target(&self) -> Option<usize> {
        self.position.checked_sub(1)
    }

    /// Index of the command the next redo replays.
    pub fn redo_target(&self) -> Option<usize> {
        self.can_redo().then_some(self.position)
    }

    /// Record that the undo target has been reverted.
    pub fn mark_undone(&mut self) {
        assert!(self.position > 0, "nothing to undo");
        self.position -= 1;
        self.redo_depth += 1;
    }

    /// Record that the redo target has been replayed.
    pub fn mark_redone(&mut self) {
        assert!(self.redo_depth > 0, "nothing to redo");
        self.position += 1;
        self.redo_depth -= 1;
    }
}
