//! Shared test helpers for integration tests
//!
//! Note: Functions may appear unused because each test file compiles separately.

#![allow(dead_code)]

use std::borrow::Cow;

use bracket_indent::config::IndentConfig;
use bracket_indent::error::EditError;
use bracket_indent::host::{TextEdit, TextEditor, UndoStop};
use bracket_indent::model::{BufferEditor, EditorSettings, Position, Selection};
use bracket_indent::update::{insert_newlines_and_indent, NewlineReport};

/// Create an editor over `text` with one cursor at (line, column)
pub fn test_editor(text: &str, line: usize, column: usize) -> BufferEditor {
    test_editor_with_cursors(text, &[(line, column)])
}

/// Create an editor with an empty cursor at each (line, column), in the given order
pub fn test_editor_with_cursors(text: &str, cursors: &[(usize, usize)]) -> BufferEditor {
    let mut editor = BufferEditor::with_text(text);
    editor.set_selections(
        cursors
            .iter()
            .map(|&(line, column)| Selection::new(Position::new(line, column)))
            .collect(),
    );
    editor
}

/// Create an editor with a single selection from anchor to head
pub fn test_editor_with_selection(
    text: &str,
    anchor_line: usize,
    anchor_col: usize,
    head_line: usize,
    head_col: usize,
) -> BufferEditor {
    let mut editor = BufferEditor::with_text(text);
    editor.set_selections(vec![Selection::from_anchor_head(
        Position::new(anchor_line, anchor_col),
        Position::new(head_line, head_col),
    )]);
    editor
}

/// Indent with tabs at the given tab size
pub fn tab_settings(tab_size: usize) -> EditorSettings {
    EditorSettings {
        tab_size,
        insert_spaces: false,
    }
}

/// Press Enter once with the given config, panicking if the core fails
pub fn press_enter(editor: &mut BufferEditor, config: &IndentConfig) -> NewlineReport {
    insert_newlines_and_indent(editor, config).expect("newline insertion failed")
}

/// Press Enter once with the default config
pub fn press_enter_default(editor: &mut BufferEditor) -> NewlineReport {
    press_enter(editor, &IndentConfig::default())
}

/// Cursor heads as (line, column) pairs, in the host's order
pub fn cursor_positions(editor: &BufferEditor) -> Vec<(usize, usize)> {
    editor
        .selections
        .iter()
        .map(|selection| (selection.head.line, selection.head.column))
        .collect()
}

/// Lines of the buffer, without line endings
pub fn buffer_lines(editor: &BufferEditor) -> Vec<String> {
    (0..editor.line_count())
        .map(|line| editor.line_text(line).into_owned())
        .collect()
}

// ========================================================================
// Failing host
// ========================================================================

/// Host wrapper that fails one edit batch, for exercising rollback
pub struct FlakyEditor {
    pub inner: BufferEditor,
    /// 1-based index of the non-empty batch to fail
    pub fail_on_batch: usize,
    pub error: EditError,
    batches: usize,
}

impl FlakyEditor {
    pub fn new(inner: BufferEditor, fail_on_batch: usize, error: EditError) -> Self {
        Self {
            inner,
            fail_on_batch,
            error,
            batches: 0,
        }
    }

    /// Number of non-empty batches seen, including the failed one
    pub fn batches(&self) -> usize {
        self.batches
    }
}

impl TextEditor for FlakyEditor {
    fn line_count(&self) -> usize {
        self.inner.line_count()
    }

    fn line_text(&self, line: usize) -> Cow<'_, str> {
        self.inner.line_text(line)
    }

    fn selections(&self) -> &[Selection] {
        self.inner.selections()
    }

    fn primary_index(&self) -> usize {
        self.inner.primary_index()
    }

    fn set_selection(&mut self, index: usize, selection: Selection) {
        self.inner.set_selection(index, selection)
    }

    fn settings(&self) -> EditorSettings {
        self.inner.settings()
    }

    fn line_ending(&self) -> &str {
        self.inner.line_ending()
    }

    fn apply_edits(&mut self, edits: &[TextEdit], undo: UndoStop) -> Result<(), EditError> {
        if !edits.is_empty() {
            self.batches += 1;
            if self.batches == self.fail_on_batch {
                return Err(self.error.clone());
            }
        }
        self.inner.apply_edits(edits, undo)
    }

    fn undo(&mut self) -> Result<bool, EditError> {
        self.inner.undo()
    }
}
