//! Bracket-aware newline indentation
//!
//! Intercepts the Enter key in a text editor and indents the new line from
//! the bracket structure before the cursor: the column right after the
//! nearest unmatched open bracket, the indentation of a line that closes
//! what the cursor line leaves open, or plain auto-indent as the fallback.
//! Pressing Enter between an empty bracket pair splits it over two lines.
//!
//! The core is host-agnostic. It reads and edits through [`host::TextEditor`];
//! [`model::BufferEditor`] is the in-memory host used by the CLI and tests.

pub mod cli;
pub mod config;
pub mod config_paths;
pub mod error;
pub mod host;
pub mod indent;
pub mod intercept;
pub mod model;
pub mod tracing;
pub mod update;
pub mod util;

// Re-export commonly used types
pub use config::IndentConfig;
pub use error::{ConfigError, EditError};
pub use host::{TextEdit, TextEditor, UndoStop};
pub use intercept::{dispatch_type, Dispatch, EditorContext};
pub use model::{BufferEditor, Position, Selection};
pub use update::insert_newlines_and_indent;
