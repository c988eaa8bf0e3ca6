//! Bracket-aware newline indentation
//!
//! Computes where the content of a new line should start, in visual columns,
//! from the brackets before the cursor:
//!
//! 1. [`scanner`] looks for the nearest unmatched open bracket (or a line
//!    above that balances the cursor line) and answers with a column.
//! 2. [`default`] is the fallback when the scan has no answer.
//! 3. [`split`] detects the cursor sitting inside an empty bracket pair and
//!    supplies a second column for the closing bracket's own line.
//! 4. [`whitespace`] renders columns as tabs/spaces.

pub mod brackets;
pub mod default;
pub mod scanner;
pub mod split;
pub mod whitespace;

pub use brackets::{Bracket, BracketFamily, BracketSide, BracketTally};
pub use default::default_indentation;
pub use scanner::{find_bracket_indentation, scan_line, ScanState};
pub use split::closing_bracket_split;
pub use whitespace::indentation_whitespace;

use crate::config::IndentConfig;
use crate::host::TextEditor;
use crate::model::{EditorSettings, Selection};

/// Where the indentation of a new line came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndentSource {
    /// An unmatched bracket or a balancing line above the cursor
    Bracket,
    /// The plain auto-indent fallback
    Default,
}

/// Indentation for one newline insertion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndentPlan {
    /// Column for the cursor's new line
    pub column: usize,
    /// Column for the closing bracket's line, when the cursor splits an empty pair
    pub closing_column: Option<usize>,
    pub source: IndentSource,
}

impl IndentPlan {
    /// Text to insert in place of the selection: line ending plus indentation
    pub fn newline_text(&self, line_ending: &str, settings: EditorSettings) -> String {
        newline_with_indent(line_ending, self.column, settings)
    }

    /// Text for the closing bracket's line, if the plan splits
    pub fn closing_text(&self, line_ending: &str, settings: EditorSettings) -> Option<String> {
        self.closing_column
            .map(|column| newline_with_indent(line_ending, column, settings))
    }
}

fn newline_with_indent(line_ending: &str, column: usize, settings: EditorSettings) -> String {
    let whitespace = indentation_whitespace(column, settings.tab_size, settings.insert_spaces);
    let mut text = String::with_capacity(line_ending.len() + whitespace.len());
    text.push_str(line_ending);
    text.push_str(&whitespace);
    text
}

/// Plan the indentation for pressing Enter at `selection`, reading the
/// buffer as it is right now.
pub fn plan_newline<E: TextEditor + ?Sized>(
    editor: &E,
    selection: &Selection,
    config: &IndentConfig,
) -> IndentPlan {
    let settings = editor.settings().normalized();
    let tab_size = settings.tab_size;
    let start = selection.start();
    let angle = config.include_angle_brackets;

    let (column, source) = match find_bracket_indentation(editor, start, tab_size, config) {
        Some(column) => (column, IndentSource::Bracket),
        None => (
            default_indentation(editor, start, tab_size, true, angle),
            IndentSource::Default,
        ),
    };

    IndentPlan {
        column,
        closing_column: closing_bracket_split(editor, selection, tab_size, angle),
        source,
    }
}
