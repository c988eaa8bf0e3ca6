//! Typing interception: route newline keypresses to the indentation core.
//!
//! The host owns command registration. It hands every "type" command to the
//! handler from [`newline_handler`] (or calls [`dispatch_type`] directly) and
//! runs its own default typing whenever the result is [`Dispatch::Native`].

use crate::config::IndentConfig;
use crate::host::TextEditor;
use crate::update::{insert_newlines_and_indent, NewlineReport};

/// URI of the debug console input buffer, which must keep default typing
pub const DEBUG_INPUT_URI: &str = "debug:input";

/// What the host knows about the editor receiving the keypress
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditorContext {
    /// Document URI
    pub uri: String,
    /// Set by the host for inputs that must not be altered
    pub requires_default_behavior: bool,
}

impl EditorContext {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            requires_default_behavior: false,
        }
    }

    pub fn bypasses_core(&self) -> bool {
        self.requires_default_behavior || self.uri == DEBUG_INPUT_URI
    }
}

/// Outcome of one intercepted "type" command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    /// The core inserted the newline(s)
    Indented(NewlineReport),
    /// The host must run its default typing for this text
    Native,
}

/// Whether typed text is a newline the core should handle
pub fn is_newline(text: &str) -> bool {
    text == "\n" || text == "\r\n"
}

/// Handle a typed `text` for the active editor.
///
/// Returns [`Dispatch::Native`] when there is no active editor, the context
/// requires default behavior, the text is not a newline, or the core's edits
/// were rejected (after rolling them back).
pub fn dispatch_type<E: TextEditor + ?Sized>(
    editor: Option<&mut E>,
    context: &EditorContext,
    text: &str,
    config: &IndentConfig,
) -> Dispatch {
    let Some(editor) = editor else {
        return Dispatch::Native;
    };
    if context.bypasses_core() || !is_newline(text) {
        return Dispatch::Native;
    }

    match insert_newlines_and_indent(editor, config) {
        Ok(report) => Dispatch::Indented(report),
        Err(err) => {
            tracing::warn!(uri = %context.uri, %err, "falling back to native newline");
            Dispatch::Native
        }
    }
}

/// Handler signature the host registers for "type" commands
pub type NewlineHandler =
    Box<dyn FnMut(Option<&mut dyn TextEditor>, &EditorContext, &str, &IndentConfig) -> Dispatch>;

/// Host-side command registration
pub trait CommandRegistry {
    fn register_newline_interceptor(&mut self, handler: NewlineHandler);
}

/// The interceptor the core supplies for registration
pub fn newline_handler() -> NewlineHandler {
    Box::new(
        |editor: Option<&mut dyn TextEditor>,
         context: &EditorContext,
         text: &str,
         config: &IndentConfig| dispatch_type(editor, context, text, config),
    )
}

/// Register the core's newline interceptor with a host
pub fn register<R: CommandRegistry + ?Sized>(registry: &mut R) {
    tracing::debug!("registering newline interceptor");
    registry.register_newline_interceptor(newline_handler());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{BufferEditor, Position, Selection};

    #[test]
    fn test_is_newline() {
        assert!(is_newline("\n"));
        assert!(is_newline("\r\n"));
        assert!(!is_newline("\r"));
        assert!(!is_newline("a"));
        assert!(!is_newline("\n\n"));
    }

    #[test]
    fn test_debug_input_bypasses_core() {
        assert!(EditorContext::new(DEBUG_INPUT_URI).bypasses_core());
        assert!(!EditorContext::new("file:///tmp/a.rs").bypasses_core());
        let forced = EditorContext {
            uri: "file:///tmp/a.rs".to_string(),
            requires_default_behavior: true,
        };
        assert!(forced.bypasses_core());
    }

    #[test]
    fn test_no_active_editor_is_native() {
        let dispatch = dispatch_type::<BufferEditor>(
            None,
            &EditorContext::default(),
            "\n",
            &IndentConfig::default(),
        );
        assert_eq!(dispatch, Dispatch::Native);
    }

    #[test]
    fn test_non_newline_text_is_untouched() {
        let mut editor = BufferEditor::with_text("foo(");
        editor.set_selections(vec![Selection::new(Position::new(0, 4))]);
        let dispatch = dispatch_type(
            Some(&mut editor),
            &EditorContext::default(),
            "x",
            &IndentConfig::default(),
        );
        assert_eq!(dispatch, Dispatch::Native);
        assert_eq!(editor.text(), "foo(");
    }
}
