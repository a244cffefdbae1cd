//! The playground controller
//!
//! [`Playground`] wires an editor, a run control, and a results area together.
//! It never touches a terminal directly: everything visible goes through the
//! [`View`] it was given, and code is run through an injected [`Evaluator`].
//! That keeps the controller testable without a real screen.
//!
//! A run is one synchronous step: read the editor text, evaluate it, and
//! write exactly one of the value or the error message into the results area,
//! replacing whatever was there.

pub mod console;

use crate::editor::{SyntaxMode, ThemeName};
use crate::evaluator::{EvaluationError, Evaluator};
use std::fmt;
use tracing::{debug, info, warn};

/// Snippet loaded into the editor when no file is given
pub const SAMPLE_SNIPPET: &str = "var x = 3;\nvar y = 4;\nreturn (x + y);";

/// Everything the controller needs from the surrounding UI
pub trait View {
    fn set_theme(&mut self, theme: ThemeName);
    fn set_mode(&mut self, mode: SyntaxMode);
    fn set_editor_text(&mut self, text: &str);
    fn editor_text(&self) -> String;

    /// Replace the results area with a successful value's text
    fn show_result(&mut self, text: &str);

    /// Replace the results area with an error message
    fn show_error(&mut self, message: &str);
}

/// How the editor is set up on initialization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    pub theme: ThemeName,
    pub mode: SyntaxMode,
    pub initial_text: String,
}

impl Default for EditorSettings {
    fn default() -> Self {
        EditorSettings {
            theme: ThemeName::Monokai,
            mode: SyntaxMode::JavaScript,
            initial_text: SAMPLE_SNIPPET.to_string(),
        }
    }
}

/// Outcome of a single run
#[derive(Debug, Clone, PartialEq)]
pub enum EvaluationResult<T> {
    Value(T),
    Error(EvaluationError),
}

impl<T: fmt::Display> EvaluationResult<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, EvaluationResult::Error(_))
    }

    /// The text written into the results area
    pub fn display_text(&self) -> String {
        match self {
            EvaluationResult::Value(value) => value.to_string(),
            EvaluationResult::Error(err) => err.message().to_string(),
        }
    }
}

/// Controller binding a [`View`] to an [`Evaluator`]
pub struct Playground<V, E> {
    view: V,
    evaluator: E,
    runs: usize,
}

impl<V: View, E: Evaluator> Playground<V, E> {
    pub fn new(view: V, evaluator: E) -> Self {
        Playground {
            view,
            evaluator,
            runs: 0,
        }
    }

    /// Set up the editor: theme, then syntax mode, then the initial text
    pub fn initialize(&mut self, settings: &EditorSettings) {
        self.view.set_theme(settings.theme);
        self.view.set_mode(settings.mode);
        self.view.set_editor_text(&settings.initial_text);
        info!(
            theme = %settings.theme,
            mode = %settings.mode,
            "playground initialized"
        );
    }

    /// Evaluate the editor's current text and show the outcome.
    ///
    /// Evaluation failures are reported through the view and returned as
    /// [`EvaluationResult::Error`]; they never escape as a `Result` error.
    pub fn run(&mut self) -> EvaluationResult<E::Output> {
        let code = self.view.editor_text();
        self.runs += 1;
        debug!(run = self.runs, bytes = code.len(), "evaluating editor text");

        match self.evaluator.evaluate(&code) {
            Ok(value) => {
                let text = value.to_string();
                info!(run = self.runs, result = %text, "evaluation succeeded");
                self.view.show_result(&text);
                EvaluationResult::Value(value)
            }
            Err(err) => {
                warn!(run = self.runs, error = %err, "evaluation failed");
                self.view.show_error(err.message());
                EvaluationResult::Error(err)
            }
        }
    }

    /// Number of runs performed so far
    pub fn runs(&self) -> usize {
        self.runs
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn into_view(self) -> V {
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::Interpreter;

    /// View that records what the controller writes
    #[derive(Default)]
    struct RecordingView {
        theme: Option<ThemeName>,
        mode: Option<SyntaxMode>,
        text: String,
        results: String,
        writes: Vec<(bool, String)>,
    }

    impl View for RecordingView {
        fn set_theme(&mut self, theme: ThemeName) {
            self.theme = Some(theme);
        }

        fn set_mode(&mut self, mode: SyntaxMode) {
            self.mode = Some(mode);
        }

        fn set_editor_text(&mut self, text: &str) {
            self.text = text.to_string();
        }

        fn editor_text(&self) -> String {
            self.text.clone()
        }

        fn show_result(&mut self, text: &str) {
            self.results = text.to_string();
            self.writes.push((false, text.to_string()));
        }

        fn show_error(&mut self, message: &str) {
            self.results = message.to_string();
            self.writes.push((true, message.to_string()));
        }
    }

    /// Evaluator that echoes its input back, or fails on "fail"
    struct EchoEvaluator;

    impl Evaluator for EchoEvaluator {
        type Output = String;

        fn evaluate(&mut self, code: &str) -> Result<String, EvaluationError> {
            if code == "fail" {
                Err(EvaluationError::new("echo failed"))
            } else {
                Ok(code.to_uppercase())
            }
        }
    }

    #[test]
    fn test_initialize_applies_settings() {
        let mut playground = Playground::new(RecordingView::default(), Interpreter::default());
        playground.initialize(&EditorSettings::default());

        let view = playground.view();
        assert_eq!(view.theme, Some(ThemeName::Monokai));
        assert_eq!(view.mode, Some(SyntaxMode::JavaScript));
        assert_eq!(view.text, SAMPLE_SNIPPET);
        assert!(view.writes.is_empty());
    }

    #[test]
    fn test_run_writes_exactly_one_outcome() {
        let mut playground = Playground::new(RecordingView::default(), EchoEvaluator);
        playground.view_mut().set_editor_text("abc");

        let result = playground.run();
        assert_eq!(result, EvaluationResult::Value("ABC".to_string()));
        assert_eq!(playground.view().writes, vec![(false, "ABC".to_string())]);

        playground.view_mut().set_editor_text("fail");
        let result = playground.run();
        assert!(result.is_error());
        assert_eq!(result.display_text(), "echo failed");
        assert_eq!(playground.view().writes.len(), 2);
        assert_eq!(playground.view().results, "echo failed");
        assert_eq!(playground.runs(), 2);
    }

    #[test]
    fn test_sample_runs_to_seven() {
        let mut playground = Playground::new(RecordingView::default(), Interpreter::default());
        playground.initialize(&EditorSettings::default());

        let result = playground.run();
        assert_eq!(result.display_text(), "7");
        assert_eq!(playground.view().results, "7");
    }
}
