//! The terminal UI's implementation of [`View`]

use crate::editor::{EditorBuffer, SyntaxMode, ThemeName};
use crate::playground::View;

/// What the results pane currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ResultsContent {
    #[default]
    Empty,
    Value(String),
    Error(String),
}

impl ResultsContent {
    pub fn text(&self) -> Option<&str> {
        match self {
            ResultsContent::Empty => None,
            ResultsContent::Value(text) | ResultsContent::Error(text) => Some(text),
        }
    }
}

/// Editor buffer plus results area, drawn by the panes
#[derive(Debug, Default)]
pub struct TuiView {
    pub editor: EditorBuffer,
    pub results: ResultsContent,
}

impl TuiView {
    pub fn new() -> Self {
        Self::default()
    }
}

impl View for TuiView {
    fn set_theme(&mut self, theme: ThemeName) {
        self.editor.set_theme(theme);
    }

    fn set_mode(&mut self, mode: SyntaxMode) {
        self.editor.set_mode(mode);
    }

    fn set_editor_text(&mut self, text: &str) {
        self.editor.set_value(text);
    }

    fn editor_text(&self) -> String {
        self.editor.value()
    }

    fn show_result(&mut self, text: &str) {
        self.results = ResultsContent::Value(text.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.results = ResultsContent::Error(message.to_string());
    }
}
