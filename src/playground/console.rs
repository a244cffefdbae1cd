//! Headless view: the editor is a plain string and results go to writers.

use crate::editor::{SyntaxMode, ThemeName};
use crate::playground::View;
use std::io::{self, Write};

/// A [`View`] for running a snippet once without a terminal UI.
///
/// Values are written to `out`, error messages to `err`, each followed by a
/// newline.
pub struct ConsoleView<O: Write, W: Write> {
    text: String,
    out: O,
    err: W,
    failed: bool,
}

impl ConsoleView<io::Stdout, io::Stderr> {
    pub fn stdio() -> Self {
        ConsoleView::new(io::stdout(), io::stderr())
    }
}

impl<O: Write, W: Write> ConsoleView<O, W> {
    pub fn new(out: O, err: W) -> Self {
        ConsoleView {
            text: String::new(),
            out,
            err,
            failed: false,
        }
    }

    /// Whether the last outcome written was an error
    pub fn failed(&self) -> bool {
        self.failed
    }

    pub fn into_writers(self) -> (O, W) {
        (self.out, self.err)
    }
}

impl<O: Write, W: Write> View for ConsoleView<O, W> {
    fn set_theme(&mut self, _theme: ThemeName) {}

    fn set_mode(&mut self, _mode: SyntaxMode) {}

    fn set_editor_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    fn editor_text(&self) -> String {
        self.text.clone()
    }

    fn show_result(&mut self, text: &str) {
        self.failed = false;
        if let Err(e) = writeln!(self.out, "{}", text) {
            tracing::error!(error = %e, "failed to write result");
        }
    }

    fn show_error(&mut self, message: &str) {
        self.failed = true;
        if let Err(e) = writeln!(self.err, "{}", message) {
            tracing::error!(error = %e, "failed to write error message");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::Interpreter;
    use crate::playground::{EditorSettings, Playground};

    #[test]
    fn test_value_goes_to_out() {
        let view = ConsoleView::new(Vec::new(), Vec::new());
        let mut playground = Playground::new(view, Interpreter::default());
        playground.initialize(&EditorSettings::default());
        playground.run();

        let view = playground.into_view();
        assert!(!view.failed());
        let (out, err) = view.into_writers();
        assert_eq!(String::from_utf8(out).unwrap(), "7\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_error_goes_to_err() {
        let view = ConsoleView::new(Vec::new(), Vec::new());
        let mut playground = Playground::new(view, Interpreter::default());
        playground.view_mut().set_editor_text("1/0");
        playground.run();

        let view = playground.into_view();
        assert!(view.failed());
        let (out, err) = view.into_writers();
        assert!(out.is_empty());
        assert_eq!(String::from_utf8(err).unwrap(), "Division by zero\n");
    }
}
