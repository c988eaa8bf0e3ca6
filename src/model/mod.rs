//! Editor model - the buffer, selections and settings the core operates on

pub mod document;
pub mod editor;

pub use document::{Document, EditGroup, EditOperation, LineEnding};
pub use editor::{BufferEditor, EditorSettings, Position, Selection};
