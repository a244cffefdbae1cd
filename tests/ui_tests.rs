// Rendering tests for the terminal UI against ratatui's test backend

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use playground::evaluator::Interpreter;
use playground::playground::EditorSettings;
use playground::ui::App;
use ratatui::{backend::TestBackend, Terminal};

fn screen_text(terminal: &Terminal<TestBackend>) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width as usize;

    buffer
        .content()
        .chunks(width)
        .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text of one screen row inside the results pane, which takes the right 40 columns
fn results_row(screen: &str, row: usize) -> String {
    let text: String = screen.lines().nth(row).unwrap().chars().skip(60).collect();
    text.trim_matches(|c: char| c == '│' || c == ' ').to_string()
}

fn draw(app: &mut App<Interpreter>) -> String {
    let mut terminal = Terminal::new(TestBackend::new(100, 20)).unwrap();
    terminal.draw(|f| app.render(f)).unwrap();
    screen_text(&terminal)
}

#[test]
fn test_initial_screen_shows_sample() {
    let mut app = App::new(Interpreter::default(), &EditorSettings::default());
    let screen = draw(&mut app);

    assert!(screen.contains("var x = 3;"));
    assert!(screen.contains("return (x + y);"));
    assert!(screen.contains("Ready!"));
}

#[test]
fn test_run_shows_value_in_results_pane() {
    let mut app = App::new(Interpreter::default(), &EditorSettings::default());
    app.handle_key_event(KeyEvent::new(KeyCode::F(5), KeyModifiers::NONE));
    let screen = draw(&mut app);

    assert!(screen.contains("Run 1 finished"));

    assert_eq!(results_row(&screen, 1), "7");
}

#[test]
fn test_run_shows_error_in_results_pane() {
    let settings = EditorSettings {
        initial_text: "var total = 10;\ntotal / 0".to_string(),
        ..EditorSettings::default()
    };
    let mut app = App::new(Interpreter::default(), &settings);
    app.run_snippet();
    let screen = draw(&mut app);

    assert!(screen.contains("Division by zero"));
    assert!(screen.contains("Run 1 failed at line 2"));
}

#[test]
fn test_long_result_scrolls_through_wrapped_lines() {
    let settings = EditorSettings {
        initial_text: "var s = '';\nfor (var i = 0; i < 300; i++) { s += i + ' '; }\ns".to_string(),
        ..EditorSettings::default()
    };
    let mut app = App::new(Interpreter::default(), &settings);
    app.run_snippet();
    let before = draw(&mut app);
    assert!(results_row(&before, 1).starts_with("0 1 2 3"));

    app.handle_key_event(KeyEvent::new(KeyCode::Tab, KeyModifiers::NONE));
    app.handle_key_event(KeyEvent::new(KeyCode::Down, KeyModifiers::NONE));
    let after = draw(&mut app);

    assert_eq!(app.results_scroll, 1);
    assert_ne!(results_row(&after, 1), results_row(&before, 1));
    assert_eq!(results_row(&after, 1), results_row(&before, 2));
}
