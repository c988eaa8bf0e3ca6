//! Utility functions for line text inspection

/// Convert a character column to a visual column.
///
/// Every tab counts as a full `tab_size` columns regardless of where it
/// sits on the line; every other character counts as one. Offsets past the
/// end of the line are clamped to the line length.
pub fn char_col_to_visual_col(text: &str, char_col: usize, tab_size: usize) -> usize {
    let mut visual_col = 0;

    for (i, ch) in text.chars().enumerate() {
        if i >= char_col {
            break;
        }

        if ch == '\t' {
            visual_col += tab_size;
        } else {
            visual_col += 1;
        }
    }

    visual_col
}

/// Number of leading whitespace characters (spaces and tabs) on a line.
///
/// For a line made only of whitespace this is the line length.
pub fn leading_whitespace_len(text: &str) -> usize {
    text.chars().take_while(|c| *c == ' ' || *c == '\t').count()
}

/// Take the first `char_col` characters of a line.
pub fn char_prefix(text: &str, char_col: usize) -> &str {
    match text.char_indices().nth(char_col) {
        Some((byte_idx, _)) => &text[..byte_idx],
        None => text,
    }
}

/// Character at a character column, if any.
pub fn char_at(text: &str, char_col: usize) -> Option<char> {
    text.chars().nth(char_col)
}
