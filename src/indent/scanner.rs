//! Backward bracket scan.
//!
//! Walks from the cursor towards the start of the document, reading brackets
//! right to left. The first open bracket that is still unmatched relative to
//! the cursor decides the indentation: the new line starts one column after it.
//! A closing bracket read before its opener is tallied first, so the opener
//! later counts as matched instead of resolving the scan.

use std::borrow::Cow;

use super::brackets::{ends_with_open_bracket, Bracket, BracketTally};
use crate::config::IndentConfig;
use crate::host::TextEditor;
use crate::model::Position;
use crate::util::text::{char_col_to_visual_col, char_prefix};

/// State shared across all lines of one backward scan
#[derive(Debug, Clone, Default)]
pub struct ScanState {
    pub tally: BracketTally,
    /// Columns added by a skipped trailing bracket
    pub pending_offset: usize,
    skipped_trailing: bool,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Scan one line's brackets from right to left against the shared tally.
///
/// Returns the visual column just past the nearest unmatched open bracket,
/// or `None` if nothing on this line resolves the scan.
pub fn scan_line(
    line: &str,
    state: &mut ScanState,
    tab_size: usize,
    config: &IndentConfig,
) -> Option<usize> {
    let brackets: Vec<(usize, Bracket)> = line
        .chars()
        .enumerate()
        .filter_map(|(i, ch)| {
            Bracket::classify(ch, config.include_angle_brackets).map(|bracket| (i, bracket))
        })
        .collect();

    if brackets.is_empty() {
        return None;
    }

    let last_content = line.trim_end().chars().count().checked_sub(1);

    for &(index, bracket) in brackets.iter().rev() {
        if !bracket.is_open() {
            state.tally.add(bracket.family, 1);
            continue;
        }

        if state.tally.get(bracket.family) != 0 {
            state.tally.add(bracket.family, -1);
            continue;
        }

        if config.tab_stop_after_trailing_bracket
            && !state.skipped_trailing
            && Some(index) == last_content
        {
            state.skipped_trailing = true;
            state.pending_offset += tab_size;
            tracing::trace!(index, "skipping trailing open bracket");
            continue;
        }

        return Some(char_col_to_visual_col(line, index, tab_size) + 1 + state.pending_offset);
    }

    None
}

/// Find the indentation column implied by the brackets before `position`.
///
/// `None` means "no answer": the caller should fall back to the default
/// indentation. Unbalanced input never errors, it only ends in `None`.
pub fn find_bracket_indentation<E: TextEditor + ?Sized>(
    editor: &E,
    position: Position,
    tab_size: usize,
    config: &IndentConfig,
) -> Option<usize> {
    let start_text = editor.line_text(position.line);
    let prefix = char_prefix(&start_text, position.column);

    if config.use_default_indentation_after_empty_bracket
        && ends_with_open_bracket(prefix, config.include_angle_brackets)
    {
        return None;
    }

    let mut state = ScanState::new();

    for line_idx in (0..=position.line).rev() {
        let is_start_line = line_idx == position.line;
        let text: Cow<'_, str> = if is_start_line {
            Cow::Borrowed(prefix)
        } else {
            editor.line_text(line_idx)
        };

        if let Some(column) = scan_line(&text, &mut state, tab_size, config) {
            tracing::trace!(line = line_idx, column, "bracket scan resolved");
            return Some(column);
        }

        if state.tally.all_closed() {
            if !is_start_line {
                // Balanced from here to the cursor: keep this statement's indentation
                let indent = editor.first_non_whitespace_offset(line_idx);
                let column = char_col_to_visual_col(&text, indent, tab_size);
                return Some(column + state.pending_offset);
            }
            return None;
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indent::brackets::BracketFamily;
    use crate::model::BufferEditor;

    fn scan(text: &str, line: usize, column: usize, config: &IndentConfig) -> Option<usize> {
        let editor = BufferEditor::with_text(text);
        find_bracket_indentation(&editor, Position::new(line, column), 4, config)
    }

    #[test]
    fn test_scan_line_resolves_after_open_paren() {
        let mut state = ScanState::new();
        assert_eq!(
            scan_line("foo(", &mut state, 4, &IndentConfig::default()),
            Some(4)
        );
    }

    #[test]
    fn test_scan_line_balanced_is_unresolved_and_closed() {
        let mut state = ScanState::new();
        assert_eq!(
            scan_line("f(a[1], {b})", &mut state, 4, &IndentConfig::default()),
            None
        );
        assert!(state.tally.all_closed());
    }

    #[test]
    fn test_scan_line_tallies_unmatched_closers() {
        let mut state = ScanState::new();
        assert_eq!(
            scan_line("  x)]", &mut state, 4, &IndentConfig::default()),
            None
        );
        assert_eq!(state.tally.get(BracketFamily::Paren), 1);
        assert_eq!(state.tally.get(BracketFamily::Square), 1);
        assert!(!state.tally.all_closed());
    }

    #[test]
    fn test_scan_line_families_do_not_cancel() {
        // The `)` does not match `[`, so `[` is the nearest unmatched open
        let mut state = ScanState::new();
        assert_eq!(
            scan_line("a[b)", &mut state, 4, &IndentConfig::default()),
            Some(2)
        );
    }

    #[test]
    fn test_scan_line_counts_tabs() {
        let mut state = ScanState::new();
        assert_eq!(
            scan_line("\tf(", &mut state, 4, &IndentConfig::default()),
            Some(6)
        );
    }

    #[test]
    fn test_cursor_after_open_paren() {
        assert_eq!(scan("foo(", 0, 4, &IndentConfig::default()), Some(4));
    }

    #[test]
    fn test_cursor_inside_argument_list() {
        assert_eq!(
            scan("    result = call(first, ", 0, 25, &IndentConfig::default()),
            Some(18)
        );
    }

    #[test]
    fn test_only_prefix_of_cursor_line_is_scanned() {
        // The `(` after the cursor must not be considered
        assert_eq!(scan("ab(cd)", 0, 2, &IndentConfig::default()), None);
    }

    #[test]
    fn test_balanced_cursor_line_is_no_answer() {
        assert_eq!(scan("    foo(bar)", 0, 12, &IndentConfig::default()), None);
    }

    #[test]
    fn test_balanced_statement_on_cursor_line_is_no_answer() {
        // Nothing above the cursor line is consulted; the default resolver
        // copies the statement indentation instead
        let text = "if (x) {\n  doA();";
        assert_eq!(scan(text, 1, 8, &IndentConfig::default()), None);
    }

    #[test]
    fn test_inherits_indentation_of_line_that_balances() {
        let text = "  foo(a,\n      b)";
        assert_eq!(scan(text, 1, 8, &IndentConfig::default()), Some(2));
    }

    #[test]
    fn test_multiline_argument_list_aligns_with_inner_call() {
        let text = "call(alpha,\n     beta(1,\n          2)";
        assert_eq!(scan(text, 2, 12, &IndentConfig::default()), Some(5));
    }

    #[test]
    fn test_resolves_outer_bracket_on_previous_line() {
        let text = "outer(inner(a,\n            b), ";
        assert_eq!(scan(text, 1, 16, &IndentConfig::default()), Some(6));
    }

    #[test]
    fn test_closed_block_above_inherits_its_indentation() {
        let text = "let v = vec![\n    foo(\n        1,\n    ),\n";
        // `)` on the cursor line matches `foo(`, so line 1 sets the indentation
        assert_eq!(scan(text, 3, 6, &IndentConfig::default()), Some(4));
    }

    #[test]
    fn test_stray_closers_reach_document_start() {
        let text = "a\nb)\n)";
        assert_eq!(scan(text, 2, 1, &IndentConfig::default()), None);
    }

    #[test]
    fn test_empty_bracket_short_circuit() {
        let config = IndentConfig {
            use_default_indentation_after_empty_bracket: true,
            ..Default::default()
        };
        assert_eq!(scan("foo(  ", 0, 6, &config), None);
        assert_eq!(scan("foo(a, ", 0, 7, &config), Some(4));
    }

    #[test]
    fn test_angle_brackets_opt_in() {
        let text = "Map<Key, ";
        assert_eq!(scan(text, 0, 9, &IndentConfig::default()), None);
        let config = IndentConfig {
            include_angle_brackets: true,
            ..Default::default()
        };
        assert_eq!(scan(text, 0, 9, &config), Some(4));
    }

    #[test]
    fn test_trailing_bracket_tab_stop_defers_to_outer() {
        let config = IndentConfig {
            tab_stop_after_trailing_bracket: true,
            ..Default::default()
        };
        // `baz(` is trailing: skipped, +4 on top of the line that closes `bar(`
        let text = "foo(\n  bar(a,\n  b), baz(";
        assert_eq!(scan(text, 2, 10, &config), Some(6));
        assert_eq!(scan(text, 2, 10, &IndentConfig::default()), Some(10));
        // Non-trailing open brackets still resolve directly
        assert_eq!(scan("foo(a, ", 0, 7, &config), Some(4));
    }

    #[test]
    fn test_trailing_bracket_tab_stop_balanced_cursor_line_is_no_answer() {
        let config = IndentConfig {
            tab_stop_after_trailing_bracket: true,
            ..Default::default()
        };
        // Skipping the trailing `{` balances the cursor line, which never
        // consults the lines above
        assert_eq!(scan("x = 1;\n        if y {", 1, 14, &config), None);
        assert_eq!(scan("foo(\n  bar(", 1, 6, &config), None);
    }

    #[test]
    fn test_trailing_bracket_tab_stop_no_outer_bracket() {
        let config = IndentConfig {
            tab_stop_after_trailing_bracket: true,
            ..Default::default()
        };
        assert_eq!(scan("foo(", 0, 4, &config), None);
    }
}
