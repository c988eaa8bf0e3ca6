//! Fallback indentation in the style of a plain editor auto-indent

use super::brackets::ends_with_open_bracket;
use crate::host::TextEditor;
use crate::model::Position;
use crate::util::text::{char_col_to_visual_col, char_prefix};

/// Copy the current line's indentation, adding one tab width when
/// `check_open_bracket` is set and the text before the cursor ends with an
/// open bracket.
///
/// The indentation boundary is the first non-whitespace character, or the
/// cursor if it sits inside the leading whitespace.
pub fn default_indentation<E: TextEditor + ?Sized>(
    editor: &E,
    position: Position,
    tab_size: usize,
    check_open_bracket: bool,
    include_angle: bool,
) -> usize {
    let line = editor.line_text(position.line);
    let boundary = position
        .column
        .min(editor.first_non_whitespace_offset(position.line));
    let mut column = char_col_to_visual_col(&line, boundary, tab_size);

    let prefix = char_prefix(&line, position.column);
    if check_open_bracket && ends_with_open_bracket(prefix, include_angle) {
        column += tab_size;
    }

    column
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::BufferEditor;

    fn default_at(text: &str, line: usize, column: usize, check: bool) -> usize {
        let editor = BufferEditor::with_text(text);
        default_indentation(&editor, Position::new(line, column), 4, check, false)
    }

    #[test]
    fn test_copies_line_indentation() {
        assert_eq!(default_at("    foo();", 0, 10, true), 4);
        assert_eq!(default_at("\t  foo();", 0, 9, true), 6);
    }

    #[test]
    fn test_cursor_inside_leading_whitespace() {
        assert_eq!(default_at("        foo", 0, 3, true), 3);
    }

    #[test]
    fn test_adds_tab_after_open_bracket() {
        assert_eq!(default_at("  if x {", 0, 8, true), 6);
        assert_eq!(default_at("  if x {  ", 0, 10, true), 6);
        assert_eq!(default_at("  if x {", 0, 8, false), 2);
    }

    #[test]
    fn test_bracket_after_cursor_does_not_count() {
        assert_eq!(default_at("  ab(", 0, 4, true), 2);
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(default_at("      ", 0, 6, true), 6);
        assert_eq!(default_at("", 0, 0, true), 0);
    }
}
