//! Turn an indentation column into literal leading whitespace

/// Whitespace reaching `column`: all spaces, or as many tabs as fit followed
/// by spaces for the remainder.
pub fn indentation_whitespace(column: usize, tab_size: usize, insert_spaces: bool) -> String {
    if insert_spaces || tab_size == 0 {
        return " ".repeat(column);
    }

    let mut whitespace = "\t".repeat(column / tab_size);
    whitespace.push_str(&" ".repeat(column % tab_size));
    whitespace
}
