//! Multi-cursor newline insertion with bracket-aware indentation.
//!
//! All selections are edited in one keypress. They are visited in document
//! order, and each one is planned against the buffer as it stands right
//! before its own edit, so earlier edits (which push later text down) are
//! already visible. Every edit is applied and acknowledged before the next
//! step starts. The whole pass is one undo group.

use serde::Serialize;
use tracing::{debug, span, warn, Level};

use crate::config::IndentConfig;
use crate::error::EditError;
use crate::host::{TextEdit, TextEditor, UndoStop};
use crate::indent::{plan_newline, IndentSource};
use crate::model::Selection;
use crate::tracing::SelectionSnapshot;

/// One step of a newline keypress, executed strictly in order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewlineStep {
    OpenUndoGroup,
    /// Insert the indented newline for the selection at this index
    Newline(usize),
    CloseUndoGroup,
}

/// What a completed keypress did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct NewlineReport {
    /// Selections that received a newline
    pub cursors: usize,
    /// Of those, how many were indented from bracket structure
    pub bracket_resolved: usize,
    /// Of those, how many split an empty bracket pair onto two lines
    pub splits: usize,
}

/// Selection indices in document order (line, then column of the start).
///
/// Ties keep the host's order.
pub fn sorted_selection_indices(selections: &[Selection]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..selections.len()).collect();
    indices.sort_by_key(|&i| selections[i].start());
    indices
}

/// The step list for one keypress over `selections`
pub fn plan_steps(selections: &[Selection]) -> Vec<NewlineStep> {
    let mut steps = Vec::with_capacity(selections.len() + 2);
    steps.push(NewlineStep::OpenUndoGroup);
    steps.extend(
        sorted_selection_indices(selections)
            .into_iter()
            .map(NewlineStep::Newline),
    );
    steps.push(NewlineStep::CloseUndoGroup);
    steps
}

/// Insert an indented newline at every selection.
///
/// On the first failed edit the remaining steps are dropped and whatever this
/// keypress already committed is undone, leaving the buffer as it was; the
/// caller is then expected to fall back to the host's own newline handling.
pub fn insert_newlines_and_indent<E: TextEditor + ?Sized>(
    editor: &mut E,
    config: &IndentConfig,
) -> Result<NewlineReport, EditError> {
    let _span = span!(Level::DEBUG, "newline", cursors = editor.selections().len()).entered();
    let before = SelectionSnapshot::new(editor.selections(), editor.primary_index());

    let steps = plan_steps(editor.selections());
    let mut report = NewlineReport::default();
    let mut committed = 0usize;

    for step in steps {
        if let Err(err) = run_step(editor, step, config, &mut report, &mut committed) {
            warn!(?step, %err, "newline edit failed, aborting remaining steps");
            roll_back(editor, step, committed);
            return Err(err);
        }
    }

    let after = SelectionSnapshot::new(editor.selections(), editor.primary_index());
    if let Some(diff) = before.diff(&after) {
        debug!(target: "cursor", %diff, "selections moved");
    }

    Ok(report)
}

fn run_step<E: TextEditor + ?Sized>(
    editor: &mut E,
    step: NewlineStep,
    config: &IndentConfig,
    report: &mut NewlineReport,
    committed: &mut usize,
) -> Result<(), EditError> {
    match step {
        NewlineStep::OpenUndoGroup => editor.apply_edits(&[], UndoStop::Open),
        NewlineStep::CloseUndoGroup => editor.apply_edits(&[], UndoStop::Close),
        NewlineStep::Newline(index) => {
            // Re-read: earlier steps may have moved this selection
            let selection = current_selection(editor, index)?;
            let plan = plan_newline(editor, &selection, config);
            let settings = editor.settings().normalized();
            let line_ending = editor.line_ending().to_string();

            debug!(
                index,
                line = selection.start().line,
                column = plan.column,
                source = ?plan.source,
                split = plan.closing_column.is_some(),
                "newline plan"
            );

            let text = plan.newline_text(&line_ending, settings);
            editor.apply_edits(&[TextEdit::replace(&selection, text)], UndoStop::Continue)?;
            *committed += 1;

            report.cursors += 1;
            if plan.source == IndentSource::Bracket {
                report.bracket_resolved += 1;
            }

            if let Some(closing) = plan.closing_text(&line_ending, settings) {
                let cursor = current_selection(editor, index)?;
                editor.apply_edits(
                    &[TextEdit::insert(cursor.head, closing)],
                    UndoStop::Continue,
                )?;
                *committed += 1;
                // Keep the cursor between the two new lines
                editor.set_selection(index, cursor);
                report.splits += 1;
            }

            Ok(())
        }
    }
}

fn current_selection<E: TextEditor + ?Sized>(
    editor: &E,
    index: usize,
) -> Result<Selection, EditError> {
    editor
        .selections()
        .get(index)
        .copied()
        .ok_or_else(|| EditError::Rejected(format!("selection {} no longer exists", index)))
}

fn roll_back<E: TextEditor + ?Sized>(editor: &mut E, failed: NewlineStep, committed: usize) {
    if failed != NewlineStep::CloseUndoGroup {
        if let Err(err) = editor.apply_edits(&[], UndoStop::Close) {
            warn!(%err, "could not close undo group");
        }
    }
    if committed == 0 {
        return;
    }
    match editor.undo() {
        Ok(true) => debug!(committed, "rolled back partial newline edits"),
        Ok(false) => warn!(committed, "nothing to roll back"),
        Err(err) => warn!(%err, committed, "rollback failed"),
    }
}
