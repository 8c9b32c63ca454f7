#![warn(missing_docs)]
//! Textedit Core - Line-Oriented Editing Kernel
//!
//! # Overview
//!
//! `textedit-core` is the editing core of a text editor: a line-oriented mutable text store, a
//! cursor/selection motion algebra over that store, and a command-based undo/redo history that
//! records every mutation as replayable deltas.
//! It does not render, scroll, or touch the file system; callers feed it edits and positions and
//! read text back.
//!
//! # Architecture Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │  Document (history-aware mutation facade)   │  ← Public API
//! ├──────────────────────┬──────────────────────┤
//! │  History / Delta     │  Position Algebra    │  ← Undo log, motions
//! ├──────────────────────┴──────────────────────┤
//! │  TextBuffer (ordered lines)                 │  ← Document storage
//! ├─────────────────────────────────────────────┤
//! │  Line (growable char array)                 │  ← Line storage
//! └─────────────────────────────────────────────┘
//! ```
//!
//! # Quick Start
//!
//! ## Raw buffer editing
//!
//! ```rust
//! use textedit_core::{Position, TextBuffer};
//!
//! let mut buffer = TextBuffer::from_lines(["abcd"]);
//! let end = buffer.insert_range("01\n23\n45", Position::new(0, 4));
//!
//! assert_eq!(end, Position::new(2, 2));
//! assert_eq!(buffer.text(), "abcd01\n23\n45\n");
//! ```
//!
//! ## Undoable editing
//!
//! ```rust
//! use textedit_core::{Document, Position};
//!
//! let mut doc = Document::new("fn main() {}\n");
//! doc.set_cursor(Position::new(0, 11));
//! for c in " body ".chars() {
//!     doc.type_char(c);
//! }
//! assert_eq!(doc.text(), "fn main() { body }\n");
//!
//! while doc.undo() {}
//! assert_eq!(doc.text(), "fn main() {}\n");
//! assert_eq!(doc.cursor(), Position::new(0, 11));
//! ```
//!
//! # Module Description
//!
//! - [`line`] - single line storage
//! - [`buffer`] - the document as an ordered sequence of lines
//! - [`position`] - positions, selections, and the character iterator
//! - [`motion`] - pure cursor motions (clamping, words, paragraphs)
//! - [`delta`] - self-inverting edit records
//! - [`history`] - command log and undo position
//! - [`document`] - history-aware mutation facade and editing actions
//! - [`search`] - substring/regex search over character offsets
//! - [`persist`] - whole-buffer read/write over byte streams
//!
//! # Error Model
//!
//! Out-of-range indices and invalid positions handed to non-clamping operations are programming
//! errors and panic. Expected negative outcomes (nothing found, nothing to undo, a command
//! already open) are `bool`/`Option` results. Only I/O, decoding, and regex compilation produce
//! `Result` errors.

pub mod buffer;
pub mod config;
pub mod delta;
pub mod document;
pub mod history;
pub mod line;
pub mod line_ending;
pub mod motion;
pub mod persist;
pub mod position;
pub mod search;

pub use buffer::TextBuffer;
pub use config::{EditContext, EditorConfig, TabKeyBehavior};
pub use delta::Delta;
pub use document::Document;
pub use history::{Command, History, RunningKind};
pub use line::{LINE_BREAK, Line};
pub use line_ending::LineEnding;
pub use motion::CharClass;
pub use persist::{LoadError, read_buffer, write_buffer};
pub use position::{CursorIter, Direction, Position, selection_bounds};
pub use search::{SearchError, SearchMatch, SearchOptions};
