//! Document model - the rope-backed text buffer and its undo history

use ropey::Rope;
use std::borrow::Cow;
use std::path::PathBuf;

use super::editor::Selection;

/// A single replace applied to the buffer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOperation {
    /// Char offset where the edit was applied (in the buffer as it was then)
    pub position: usize,
    /// Text that was removed (empty for pure inserts)
    pub deleted_text: String,
    /// Text that was inserted
    pub inserted_text: String,
}

/// Groups edits so a whole keypress undoes in one step
#[derive(Debug, Clone, Default)]
pub struct EditGroup {
    /// Individual operations in application order (undo iterates in reverse)
    pub operations: Vec<EditOperation>,
    /// All selections before the first operation
    pub selections_before: Vec<Selection>,
    /// All selections after the last operation
    pub selections_after: Vec<Selection>,
}

impl EditGroup {
    pub fn new(selections_before: Vec<Selection>) -> Self {
        Self {
            operations: Vec::new(),
            selections_after: selections_before.clone(),
            selections_before,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }
}

/// Line ending style of a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LineEnding {
    #[default]
    Lf,
    CrLf,
}

impl LineEnding {
    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::Lf => "\n",
            LineEnding::CrLf => "\r\n",
        }
    }

    /// Detect from the first line break in the buffer, defaulting to LF
    pub fn detect(buffer: &Rope) -> Self {
        if buffer.len_lines() < 2 {
            return LineEnding::Lf;
        }
        let first = buffer.line(0);
        let len = first.len_chars();
        if len >= 2 && first.char(len - 2) == '\r' {
            LineEnding::CrLf
        } else {
            LineEnding::Lf
        }
    }
}

/// Document state - the text buffer and associated file metadata
#[derive(Debug, Clone)]
pub struct Document {
    /// The text buffer
    pub buffer: Rope,
    /// Path to the file on disk (None for stdin/in-memory text)
    pub file_path: Option<PathBuf>,
    /// Whether the buffer has unsaved changes
    pub is_modified: bool,
    /// Line ending used when inserting new lines
    pub line_ending: LineEnding,
    /// Undo stack
    pub undo_stack: Vec<EditGroup>,
    /// Redo stack
    pub redo_stack: Vec<EditGroup>,
}

impl Document {
    /// Create a new empty document
    pub fn new() -> Self {
        Self::with_text("")
    }

    /// Create a document with initial text
    pub fn with_text(text: &str) -> Self {
        let buffer = Rope::from(text);
        Self {
            line_ending: LineEnding::detect(&buffer),
            buffer,
            file_path: None,
            is_modified: false,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
        }
    }

    /// Load a document from a file path
    pub fn from_file(path: PathBuf) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(&path)?;
        let mut document = Self::with_text(&content);
        document.file_path = Some(path);
        Ok(document)
    }

    /// Write the buffer back to `file_path` if it has unsaved changes.
    ///
    /// Returns `Ok(false)` when there was nothing to write.
    pub fn save(&mut self) -> Result<bool, std::io::Error> {
        let Some(path) = self.file_path.as_ref() else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                "document has no file path",
            ));
        };
        if !self.is_modified {
            return Ok(false);
        }
        std::fs::write(path, self.buffer.to_string())?;
        self.is_modified = false;
        Ok(true)
    }

    /// Get the number of lines in the document
    pub fn line_count(&self) -> usize {
        self.buffer.len_lines()
    }

    /// Get line content as Cow<str>, avoiding allocation when possible
    ///
    /// Returns Cow::Borrowed if the line is stored contiguously in a single chunk,
    /// otherwise returns Cow::Owned with the line as a String.
    /// Also trims the trailing line ending.
    pub fn get_line_cow(&self, line_idx: usize) -> Option<Cow<'_, str>> {
        if line_idx >= self.buffer.len_lines() {
            return None;
        }

        let line = self.buffer.line(line_idx);
        let len = line.len_chars();

        let trim_len = if len > 0 && line.char(len - 1) == '\n' {
            if len > 1 && line.char(len - 2) == '\r' {
                2 // CRLF
            } else {
                1 // LF
            }
        } else {
            0
        };

        let trimmed = line.slice(..len - trim_len);

        if let Some(s) = trimmed.as_str() {
            Some(Cow::Borrowed(s))
        } else {
            Some(Cow::Owned(trimmed.to_string()))
        }
    }

    /// Get the length of a line (excluding the line ending)
    pub fn line_length(&self, line_idx: usize) -> usize {
        self.get_line_cow(line_idx)
            .map(|line| line.chars().count())
            .unwrap_or(0)
    }

    /// Convert a (line, column) position to a buffer offset
    /// Uses ropey's O(log n) line_to_char method instead of O(n) iteration
    pub fn cursor_to_offset(&self, line: usize, column: usize) -> usize {
        if line >= self.buffer.len_lines() {
            return self.buffer.len_chars();
        }
        let line_start = self.buffer.line_to_char(line);
        line_start + column.min(self.line_length(line))
    }

    /// Convert a buffer offset to (line, column) position
    /// Uses ropey's O(log n) char_to_line method instead of O(n) iteration
    pub fn offset_to_cursor(&self, offset: usize) -> (usize, usize) {
        let clamped = offset.min(self.buffer.len_chars());
        let line = self.buffer.char_to_line(clamped);
        let line_start = self.buffer.line_to_char(line);
        (line, clamped - line_start)
    }

    /// Get the column of the first non-whitespace character on a line
    pub fn first_non_whitespace_column(&self, line_idx: usize) -> usize {
        self.get_line_cow(line_idx)
            .map(|line| crate::util::text::leading_whitespace_len(&line))
            .unwrap_or(0)
    }

    /// Replace the chars in `range` with `text`, returning the applied operation
    pub fn replace(&mut self, range: std::ops::Range<usize>, text: &str) -> EditOperation {
        let deleted_text = self.buffer.slice(range.clone()).to_string();
        if !range.is_empty() {
            self.buffer.remove(range.clone());
        }
        if !text.is_empty() {
            self.buffer.insert(range.start, text);
        }
        self.is_modified = true;
        EditOperation {
            position: range.start,
            deleted_text,
            inserted_text: text.to_string(),
        }
    }

    /// Push a finished group onto the undo stack and clear the redo stack
    pub fn push_group(&mut self, group: EditGroup) {
        if group.is_empty() {
            return;
        }
        self.undo_stack.push(group);
        self.redo_stack.clear();
    }

    /// Revert the last group. Returns the selections to restore.
    pub fn undo(&mut self) -> Option<Vec<Selection>> {
        let group = self.undo_stack.pop()?;
        for op in group.operations.iter().rev() {
            let inserted_len = op.inserted_text.chars().count();
            self.revert_operation(op, inserted_len);
        }
        let selections = group.selections_before.clone();
        self.redo_stack.push(group);
        Some(selections)
    }

    /// Re-apply the last undone group. Returns the selections to restore.
    pub fn redo(&mut self) -> Option<Vec<Selection>> {
        let group = self.redo_stack.pop()?;
        for op in &group.operations {
            let deleted_len = op.deleted_text.chars().count();
            let end = op.position + deleted_len;
            if deleted_len > 0 {
                self.buffer.remove(op.position..end);
            }
            if !op.inserted_text.is_empty() {
                self.buffer.insert(op.position, &op.inserted_text);
            }
        }
        self.is_modified = true;
        let selections = group.selections_after.clone();
        self.undo_stack.push(group);
        Some(selections)
    }

    fn revert_operation(&mut self, op: &EditOperation, inserted_len: usize) {
        if inserted_len > 0 {
            self.buffer.remove(op.position..op.position + inserted_len);
        }
        if !op.deleted_text.is_empty() {
            self.buffer.insert(op.position, &op.deleted_text);
        }
        self.is_modified = true;
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_cow_trims_line_endings() {
        let doc = Document::with_text("foo(\r\n  bar\nbaz");
        assert_eq!(doc.get_line_cow(0).unwrap(), "foo(");
        assert_eq!(doc.get_line_cow(1).unwrap(), "  bar");
        assert_eq!(doc.get_line_cow(2).unwrap(), "baz");
        assert!(doc.get_line_cow(3).is_none());
    }

    #[test]
    fn test_line_ending_detection() {
        assert_eq!(Document::with_text("a\r\nb").line_ending, LineEnding::CrLf);
        assert_eq!(Document::with_text("a\nb").line_ending, LineEnding::Lf);
        assert_eq!(Document::with_text("single").line_ending, LineEnding::Lf);
    }

    #[test]
    fn test_cursor_offset_round_trip() {
        let doc = Document::with_text("ab\ncde\nf");
        assert_eq!(doc.cursor_to_offset(1, 2), 5);
        assert_eq!(doc.offset_to_cursor(5), (1, 2));
        // Column clamps to the line length
        assert_eq!(doc.cursor_to_offset(0, 99), 2);
    }

    #[test]
    fn test_replace_then_undo_redo() {
        let mut doc = Document::with_text("foo()");
        let op = doc.replace(4..4, "\n    \n");
        assert_eq!(doc.buffer.to_string(), "foo(\n    \n)");

        let mut group = EditGroup::new(vec![]);
        group.operations.push(op);
        doc.push_group(group);

        assert!(doc.undo().is_some());
        assert_eq!(doc.buffer.to_string(), "foo()");
        assert!(doc.redo().is_some());
        assert_eq!(doc.buffer.to_string(), "foo(\n    \n)");
    }

    #[test]
    fn test_empty_group_is_not_recorded() {
        let mut doc = Document::with_text("x");
        doc.push_group(EditGroup::new(vec![]));
        assert!(doc.undo_stack.is_empty());
    }

    #[test]
    fn test_save_writes_only_modified_buffers() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("call.rs");
        std::fs::write(&path, "foo()").unwrap();

        let mut doc = Document::from_file(path.clone()).unwrap();
        assert!(!doc.save().unwrap());

        doc.replace(4..4, "\n");
        assert!(doc.is_modified);
        assert!(doc.save().unwrap());
        assert!(!doc.is_modified);
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "foo(\n)");
    }

    #[test]
    fn test_save_without_path_fails() {
        let mut doc = Document::with_text("x");
        doc.replace(0..0, "y");
        assert!(doc.save().is_err());
    }

    #[test]
    fn test_first_non_whitespace_column() {
        let doc = Document::with_text("\t  x\n   \n");
        assert_eq!(doc.first_non_whitespace_column(0), 3);
        assert_eq!(doc.first_non_whitespace_column(1), 3);
        assert_eq!(doc.first_non_whitespace_column(5), 0);
    }
}
