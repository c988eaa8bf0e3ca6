//! Editor state - selections, settings and the built-in buffer host

use serde::{Deserialize, Serialize};
use std::borrow::Cow;

use super::document::{Document, EditGroup};
use crate::error::EditError;
use crate::host::{TextEdit, TextEditor, UndoStop};

/// A position in the document (line and column)
///
/// The column is a raw character offset, not a visual column.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    /// Line number (0-indexed)
    pub line: usize,
    /// Column number (0-indexed)
    pub column: usize,
}

impl Position {
    /// Create a new position
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

/// A text selection with anchor (start) and head (cursor end)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// Where the selection started (fixed point)
    pub anchor: Position,
    /// Where the cursor is (moving point)
    pub head: Position,
}

impl Selection {
    /// Create a new empty selection at a position
    pub fn new(pos: Position) -> Self {
        Self {
            anchor: pos,
            head: pos,
        }
    }

    /// Create a selection from anchor to head
    pub fn from_anchor_head(anchor: Position, head: Position) -> Self {
        Self { anchor, head }
    }

    /// Check if selection is empty (cursor without selection)
    pub fn is_empty(&self) -> bool {
        self.anchor == self.head
    }

    /// Get the start of the selection (smaller position)
    pub fn start(&self) -> Position {
        if self.anchor <= self.head {
            self.anchor
        } else {
            self.head
        }
    }

    /// Get the end of the selection (larger position)
    pub fn end(&self) -> Position {
        if self.anchor <= self.head {
            self.head
        } else {
            self.anchor
        }
    }

    /// Check if the selection is reversed (head before anchor)
    pub fn is_reversed(&self) -> bool {
        self.head < self.anchor
    }
}

/// Per-editor indentation settings, owned by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorSettings {
    #[serde(default = "default_tab_size")]
    pub tab_size: usize,
    #[serde(default = "default_insert_spaces")]
    pub insert_spaces: bool,
}

fn default_tab_size() -> usize {
    4
}

fn default_insert_spaces() -> bool {
    true
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            tab_size: default_tab_size(),
            insert_spaces: default_insert_spaces(),
        }
    }
}

impl EditorSettings {
    /// Clamp a zero tab size to 1 so column arithmetic stays defined
    pub fn normalized(self) -> Self {
        if self.tab_size == 0 {
            tracing::warn!("tab size 0 is invalid, using 1");
            return Self {
                tab_size: 1,
                ..self
            };
        }
        self
    }
}

/// In-memory editor: a document, its selections and its settings.
///
/// Implements [`TextEditor`] so the indentation core can run against it
/// directly; the CLI and the tests both use it as their host.
#[derive(Debug, Clone)]
pub struct BufferEditor {
    pub document: Document,
    /// All selections (never empty)
    pub selections: Vec<Selection>,
    /// Index of the primary selection
    pub primary: usize,
    pub settings: EditorSettings,
    /// Rejects every edit when set
    pub read_only: bool,
    /// Undo group currently being recorded
    pending_group: Option<EditGroup>,
}

impl BufferEditor {
    /// Create an editor over `document` with a single cursor at (0, 0)
    pub fn new(document: Document, settings: EditorSettings) -> Self {
        Self {
            document,
            selections: vec![Selection::default()],
            primary: 0,
            settings,
            read_only: false,
            pending_group: None,
        }
    }

    pub fn with_text(text: &str) -> Self {
        Self::new(Document::with_text(text), EditorSettings::default())
    }

    /// Replace all selections; the first one becomes primary.
    ///
    /// Selections covering the same range as an earlier one are dropped, since
    /// their edits would collide in a single batch.
    pub fn set_selections(&mut self, selections: Vec<Selection>) {
        let mut unique: Vec<Selection> = Vec::with_capacity(selections.len());
        for selection in selections {
            let duplicate = unique
                .iter()
                .any(|kept| kept.start() == selection.start() && kept.end() == selection.end());
            if duplicate {
                tracing::debug!(?selection, "dropping duplicate selection");
                continue;
            }
            unique.push(selection);
        }
        if unique.is_empty() {
            unique.push(Selection::default());
        }
        self.selections = unique;
        self.primary = 0;
    }

    /// Full buffer content
    pub fn text(&self) -> String {
        self.document.buffer.to_string()
    }

    /// Re-apply the last undone group
    pub fn redo(&mut self) -> bool {
        self.close_group();
        match self.document.redo() {
            Some(selections) => {
                self.selections = selections;
                true
            }
            None => false,
        }
    }

    /// Plain text insertion at every selection, as the host's built-in
    /// typing would do it. Used when the indentation core declines.
    pub fn type_native(&mut self, text: &str) -> Result<(), EditError> {
        let text = if text == "\n" || text == "\r\n" {
            self.line_ending().to_string()
        } else {
            text.to_string()
        };
        let edits: Vec<TextEdit> = self
            .selections
            .iter()
            .map(|selection| TextEdit::replace(selection, text.clone()))
            .collect();
        self.apply_edits(&edits, UndoStop::Open)?;
        self.apply_edits(&[], UndoStop::Close)
    }

    fn close_group(&mut self) {
        if let Some(mut group) = self.pending_group.take() {
            group.selections_after = self.selections.clone();
            self.document.push_group(group);
        }
    }

    fn position_in_bounds(&self, pos: Position) -> bool {
        pos.line < self.document.line_count() && pos.column <= self.document.line_length(pos.line)
    }

    /// Resolve edits to char ranges and reject anything out of bounds or overlapping
    fn resolve_edits<'a>(
        &self,
        edits: &'a [TextEdit],
    ) -> Result<Vec<ResolvedEdit<'a>>, EditError> {
        let mut resolved = Vec::with_capacity(edits.len());
        for edit in edits {
            if edit.start > edit.end
                || !self.position_in_bounds(edit.start)
                || !self.position_in_bounds(edit.end)
            {
                return Err(EditError::InvalidRange {
                    start: edit.start,
                    end: edit.end,
                });
            }
            resolved.push(ResolvedEdit {
                start: self
                    .document
                    .cursor_to_offset(edit.start.line, edit.start.column),
                end: self.document.cursor_to_offset(edit.end.line, edit.end.column),
                text: edit.text.as_str(),
            });
        }

        resolved.sort_by_key(|edit| (edit.start, edit.end));
        for pair in resolved.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            let same_insert_point =
                prev.start == prev.end && next.start == next.end && prev.start == next.start;
            if next.start < prev.end || same_insert_point {
                return Err(EditError::Rejected(
                    "overlapping edits in one batch".to_string(),
                ));
            }
        }
        Ok(resolved)
    }

    /// Map a pre-batch char offset through a batch of ascending edits
    fn map_offset(offset: usize, edits: &[ResolvedEdit]) -> usize {
        let mut shift: isize = 0;
        for edit in edits {
            let inserted = edit.text.chars().count();
            let removed = edit.end - edit.start;
            let after_edit = if edit.start == edit.end {
                offset >= edit.start
            } else {
                offset >= edit.end
            };
            if after_edit {
                shift += inserted as isize - removed as isize;
            } else if offset >= edit.start {
                // Inside the replaced range: collapse to the end of the new text
                return (edit.start as isize + shift) as usize + inserted;
            } else {
                break;
            }
        }
        (offset as isize + shift) as usize
    }
}

struct ResolvedEdit<'a> {
    start: usize,
    end: usize,
    text: &'a str,
}

impl TextEditor for BufferEditor {
    fn line_count(&self) -> usize {
        self.document.line_count()
    }

    fn line_text(&self, line: usize) -> Cow<'_, str> {
        self.document
            .get_line_cow(line)
            .unwrap_or(Cow::Borrowed(""))
    }

    fn first_non_whitespace_offset(&self, line: usize) -> usize {
        self.document.first_non_whitespace_column(line)
    }

    fn selections(&self) -> &[Selection] {
        &self.selections
    }

    fn primary_index(&self) -> usize {
        self.primary
    }

    fn set_selection(&mut self, index: usize, selection: Selection) {
        if let Some(slot) = self.selections.get_mut(index) {
            *slot = selection;
        }
    }

    fn settings(&self) -> EditorSettings {
        self.settings
    }

    fn line_ending(&self) -> &str {
        self.document.line_ending.as_str()
    }

    fn apply_edits(&mut self, edits: &[TextEdit], undo: UndoStop) -> Result<(), EditError> {
        if self.read_only {
            return Err(EditError::Rejected("document is read-only".to_string()));
        }
        let resolved = self.resolve_edits(edits)?;

        if undo == UndoStop::Open {
            self.close_group();
        }
        if self.pending_group.is_none() {
            self.pending_group = Some(EditGroup::new(self.selections.clone()));
        }

        // Map selections against the pre-batch offsets before touching the buffer
        let mapped: Vec<(usize, usize)> = self
            .selections
            .iter()
            .map(|selection| {
                let anchor = self
                    .document
                    .cursor_to_offset(selection.anchor.line, selection.anchor.column);
                let head = self
                    .document
                    .cursor_to_offset(selection.head.line, selection.head.column);
                (
                    Self::map_offset(anchor, &resolved),
                    Self::map_offset(head, &resolved),
                )
            })
            .collect();

        // Apply back to front so earlier offsets stay valid
        let mut operations = Vec::with_capacity(resolved.len());
        for edit in resolved.iter().rev() {
            operations.push(self.document.replace(edit.start..edit.end, edit.text));
        }

        self.selections = mapped
            .into_iter()
            .map(|(anchor, head)| {
                let (anchor_line, anchor_col) = self.document.offset_to_cursor(anchor);
                let (head_line, head_col) = self.document.offset_to_cursor(head);
                Selection::from_anchor_head(
                    Position::new(anchor_line, anchor_col),
                    Position::new(head_line, head_col),
                )
            })
            .collect();

        if let Some(group) = self.pending_group.as_mut() {
            group.operations.extend(operations);
        }
        if undo == UndoStop::Close {
            self.close_group();
        }
        Ok(())
    }

    fn undo(&mut self) -> Result<bool, EditError> {
        if self.read_only {
            return Err(EditError::Rejected("document is read-only".to_string()));
        }
        self.close_group();
        match self.document.undo() {
            Some(selections) => {
                self.selections = selections;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
