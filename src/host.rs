//! The editor surface the indentation core reads from and writes to.
//!
//! Hosts own the buffer, the selection list and the settings. The core only
//! ever talks to them through [`TextEditor`], so any editor (the built-in
//! [`BufferEditor`](crate::model::BufferEditor), or an embedding) can drive it.

use std::borrow::Cow;

use crate::error::EditError;
use crate::model::{EditorSettings, Position, Selection};
use crate::util::text::leading_whitespace_len;

/// Replace the text between `start` and `end` with `text`.
///
/// An empty range is a pure insert. All ranges in one batch refer to the
/// document as it was before the batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextEdit {
    pub start: Position,
    pub end: Position,
    pub text: String,
}

impl TextEdit {
    pub fn insert(position: Position, text: impl Into<String>) -> Self {
        Self {
            start: position,
            end: position,
            text: text.into(),
        }
    }

    pub fn replace(selection: &Selection, text: impl Into<String>) -> Self {
        Self {
            start: selection.start(),
            end: selection.end(),
            text: text.into(),
        }
    }
}

/// Undo-history boundary hint attached to an edit batch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UndoStop {
    /// Start a new undo group with this batch, leaving it open
    Open,
    /// Append to the current group
    Continue,
    /// Append to the current group and close it
    Close,
}

/// Abstract text editor the core runs against
pub trait TextEditor {
    /// Number of lines (always >= 1)
    fn line_count(&self) -> usize;

    /// Line content without its line ending. Out-of-range lines are empty.
    fn line_text(&self, line: usize) -> Cow<'_, str>;

    /// Character offset of the first non-whitespace character on a line,
    /// or the line length if the line is blank
    fn first_non_whitespace_offset(&self, line: usize) -> usize {
        leading_whitespace_len(&self.line_text(line))
    }

    /// All selections, in the host's own order
    fn selections(&self) -> &[Selection];

    /// Index of the primary (active) selection
    fn primary_index(&self) -> usize;

    /// Overwrite one selection
    fn set_selection(&mut self, index: usize, selection: Selection);

    fn settings(&self) -> EditorSettings;

    /// Line ending inserted for a new line
    fn line_ending(&self) -> &str {
        "\n"
    }

    /// Apply a batch of edits as one transaction.
    ///
    /// The host keeps every selection pointing at the same logical text:
    /// positions after an edit shift with it, positions inside or at the
    /// start of an edited range end up after the inserted text. On error
    /// nothing is committed.
    fn apply_edits(&mut self, edits: &[TextEdit], undo: UndoStop) -> Result<(), EditError>;

    /// Revert the most recent undo group. Returns false if there was none.
    fn undo(&mut self) -> Result<bool, EditError>;
}
