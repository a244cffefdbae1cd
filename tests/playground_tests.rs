// Integration tests for the playground controller

use playground::editor::{SyntaxMode, ThemeName};
use playground::evaluator::{EvaluationError, Evaluator, Interpreter};
use playground::playground::{EditorSettings, EvaluationResult, Playground, View, SAMPLE_SNIPPET};
use pretty_assertions::assert_eq;

/// Minimal view: one text field for the editor, one for the results area
#[derive(Default)]
struct MockView {
    theme: Option<ThemeName>,
    mode: Option<SyntaxMode>,
    editor: String,
    results: String,
    is_error: bool,
}

impl View for MockView {
    fn set_theme(&mut self, theme: ThemeName) {
        self.theme = Some(theme);
    }

    fn set_mode(&mut self, mode: SyntaxMode) {
        self.mode = Some(mode);
    }

    fn set_editor_text(&mut self, text: &str) {
        self.editor = text.to_string();
    }

    fn editor_text(&self) -> String {
        self.editor.clone()
    }

    fn show_result(&mut self, text: &str) {
        self.results = text.to_string();
        self.is_error = false;
    }

    fn show_error(&mut self, message: &str) {
        self.results = message.to_string();
        self.is_error = true;
    }
}

fn playground_with(code: &str) -> Playground<MockView, Interpreter> {
    let mut playground = Playground::new(MockView::default(), Interpreter::default());
    playground.initialize(&EditorSettings::default());
    playground.view_mut().set_editor_text(code);
    playground
}

#[test]
fn test_initial_editor_state() {
    let mut playground = Playground::new(MockView::default(), Interpreter::default());
    playground.initialize(&EditorSettings::default());

    let view = playground.view();
    assert_eq!(view.editor, SAMPLE_SNIPPET);
    assert_eq!(view.theme, Some(ThemeName::Monokai));
    assert_eq!(view.mode, Some(SyntaxMode::JavaScript));
    assert_eq!(view.results, "");
}

#[test]
fn test_sample_shows_seven() {
    let mut playground = Playground::new(MockView::default(), Interpreter::default());
    playground.initialize(&EditorSettings::default());
    playground.run();

    assert_eq!(playground.view().results, "7");
    assert!(!playground.view().is_error);
}

#[test]
fn test_division_by_zero_shows_message() {
    let mut playground = playground_with("1/0");
    let result = playground.run();

    assert!(result.is_error());
    assert_eq!(playground.view().results, "Division by zero");
    assert!(playground.view().is_error);
}

#[test]
fn test_error_replaces_previous_value() {
    let mut playground = playground_with("1 + 1");
    playground.run();
    assert_eq!(playground.view().results, "2");

    playground.view_mut().set_editor_text("nope");
    playground.run();
    assert_eq!(playground.view().results, "nope is not defined");

    playground.view_mut().set_editor_text("'ok'");
    playground.run();
    assert_eq!(playground.view().results, "ok");
    assert!(!playground.view().is_error);
}

#[test]
fn test_repeated_runs_are_idempotent() {
    let mut playground = playground_with("var n = 0;\nn = n + 5;\nn * 2");
    let first = playground.run();
    let second = playground.run();

    assert_eq!(first, second);
    assert_eq!(playground.view().results, "10");
    assert_eq!(playground.runs(), 2);
}

#[test]
fn test_undefined_result_is_an_error() {
    let mut playground = playground_with("var x;");
    playground.run();
    assert_eq!(
        playground.view().results,
        "Cannot read properties of undefined (reading 'toString')"
    );

    playground.view_mut().set_editor_text("null");
    playground.run();
    assert_eq!(
        playground.view().results,
        "Cannot read properties of null (reading 'toString')"
    );
}

#[test]
fn test_syntax_error_message() {
    let mut playground = playground_with("var = 3;");
    match playground.run() {
        EvaluationResult::Error(err) => {
            assert!(err.message().starts_with("Unexpected token"));
            assert!(err.location().is_some());
        }
        other => panic!("expected a syntax error, got {:?}", other),
    }
}

#[test]
fn test_runaway_loop_is_stopped() {
    let mut playground = Playground::new(MockView::default(), Interpreter::new(500));
    playground.view_mut().set_editor_text("while (true) {}");
    playground.run();

    assert_eq!(
        playground.view().results,
        "Execution step limit of 500 exceeded"
    );
}

#[test]
fn test_custom_evaluator_is_used() {
    struct Constant;

    impl Evaluator for Constant {
        type Output = i32;

        fn evaluate(&mut self, _code: &str) -> Result<i32, EvaluationError> {
            Ok(42)
        }
    }

    let mut playground = Playground::new(MockView::default(), Constant);
    playground.initialize(&EditorSettings::default());
    let result = playground.run();

    assert_eq!(result, EvaluationResult::Value(42));
    assert_eq!(playground.view().results, "42");
}

#[test]
fn test_snippet_scenarios() {
    let cases = [
        ("'a' + 1", "a1"),
        ("0.1 + 0.2", "0.30000000000000004"),
        ("let s = 0; for (let i = 1; i <= 10; i++) { s += i; } s", "55"),
        ("var f = 1; var n = 5; while (n > 1) { f *= n--; } return f;", "120"),
        ("typeof missing", "undefined"),
        ("1 < 2 ? 'yes' : 'no'", "yes"),
        ("'5' == 5", "true"),
        ("'5' === 5", "false"),
        ("-(0)", "0"),
        ("1e21 * 2", "2e+21"),
    ];

    for (code, expected) in cases {
        let mut playground = playground_with(code);
        playground.run();
        assert_eq!(playground.view().results, expected, "snippet: {}", code);
    }
}

#[test]
fn test_deeply_nested_snippet_reports_an_error() {
    let snippets = [
        format!("{}1{}", "(".repeat(100_000), ")".repeat(100_000)),
        vec!["1"; 100_000].join("+"),
    ];

    for code in &snippets {
        let mut playground = playground_with(code);
        let result = playground.run();

        assert!(result.is_error());
        assert_eq!(playground.view().results, "Maximum nesting depth exceeded");
    }
}
