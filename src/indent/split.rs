//! Closing-bracket split: pressing Enter between `(` and `)` puts the
//! closing bracket on its own line at the opening line's indentation.

use super::brackets::is_matched_pair;
use super::default::default_indentation;
use crate::host::TextEditor;
use crate::model::Selection;
use crate::util::text::char_at;

/// Column for the closing bracket's line, or `None` when the characters
/// around the selection are not an empty bracket pair.
///
/// The pair is the character before the selection start and the character at
/// the selection end, which become adjacent once the selection is replaced.
pub fn closing_bracket_split<E: TextEditor + ?Sized>(
    editor: &E,
    selection: &Selection,
    tab_size: usize,
    include_angle: bool,
) -> Option<usize> {
    let start = selection.start();
    let end = selection.end();
    let before_col = start.column.checked_sub(1)?;

    let before = char_at(&editor.line_text(start.line), before_col)?;
    let after = char_at(&editor.line_text(end.line), end.column)?;

    if !is_matched_pair(before, after, include_angle) {
        return None;
    }

    // The closing bracket must not pick up the extra indent its opener implies
    Some(default_indentation(
        editor,
        start,
        tab_size,
        false,
        include_angle,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BufferEditor, Position};

    fn split_at(text: &str, line: usize, column: usize) -> Option<usize> {
        let editor = BufferEditor::with_text(text);
        let selection = Selection::new(Position::new(line, column));
        closing_bracket_split(&editor, &selection, 4, false)
    }

    #[test]
    fn test_empty_pair_splits() {
        assert_eq!(split_at("foo()", 0, 4), Some(0));
        assert_eq!(split_at("    x = [];", 0, 9), Some(4));
        assert_eq!(split_at("\tfn f() {}", 0, 9), Some(4));
    }

    #[test]
    fn test_mismatched_or_non_adjacent_does_not_split() {
        assert_eq!(split_at("foo(]", 0, 4), None);
        assert_eq!(split_at("foo( )", 0, 4), None);
        assert_eq!(split_at(")(", 0, 1), None);
    }

    #[test]
    fn test_line_edges_do_not_split() {
        assert_eq!(split_at("()", 0, 0), None);
        assert_eq!(split_at("(", 0, 1), None);
    }

    #[test]
    fn test_selection_replaced_between_brackets() {
        let editor = BufferEditor::with_text("  call(arg)");
        let selection = Selection::from_anchor_head(Position::new(0, 10), Position::new(0, 7));
        assert_eq!(closing_bracket_split(&editor, &selection, 4, false), Some(2));
    }

    #[test]
    fn test_angle_pair_requires_opt_in() {
        let editor = BufferEditor::with_text("Vec<>");
        let selection = Selection::new(Position::new(0, 4));
        assert_eq!(closing_bracket_split(&editor, &selection, 4, false), None);
        assert_eq!(closing_bracket_split(&editor, &selection, 4, true), Some(0));
    }
}
