//! Main TUI application state and logic

use crate::evaluator::Evaluator;
use crate::playground::{EditorSettings, EvaluationResult, Playground};
use crate::ui::panes::{self, RunState};
use crate::ui::theme::palette;
use crate::ui::view::TuiView;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;
use std::time::Duration;

/// Which pane receives navigation keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Editor,
    Results,
}

impl FocusedPane {
    pub fn toggle(self) -> Self {
        match self {
            FocusedPane::Editor => FocusedPane::Results,
            FocusedPane::Results => FocusedPane::Editor,
        }
    }
}

/// The main application state
pub struct App<E: Evaluator> {
    /// Controller owning the view and the evaluator
    pub playground: Playground<TuiView, E>,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Per-pane scroll offsets
    pub editor_scroll: usize,
    pub results_scroll: usize,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,

    /// Outcome of the last run
    pub run_state: RunState,
}

impl<E: Evaluator> App<E> {
    /// Create the app and initialize the editor from `settings`
    pub fn new(evaluator: E, settings: &EditorSettings) -> Self {
        let mut playground = Playground::new(TuiView::new(), evaluator);
        playground.initialize(settings);

        App {
            playground,
            focused_pane: FocusedPane::Editor,
            editor_scroll: 0,
            results_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            run_state: RunState::Idle,
        }
    }

    /// Run the TUI event loop until the user quits
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        Ok(())
    }

    /// Render the UI
    pub fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        // Panes on top, status bar at the bottom
        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        // Editor (left) | Results (right)
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        let view = self.playground.view();
        let theme_name = view.editor.theme();
        let theme = palette(theme_name);

        panes::render_editor_pane(
            frame,
            columns[0],
            &view.editor,
            self.focused_pane == FocusedPane::Editor,
            &mut self.editor_scroll,
        );

        panes::render_results_pane(
            frame,
            columns[1],
            &view.results,
            theme,
            self.focused_pane == FocusedPane::Results,
            &mut self.results_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            theme,
            &self.status_message,
            self.run_state,
            self.playground.runs(),
            theme_name,
            view.editor.mode(),
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('q') | KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('r') if ctrl => self.run_snippet(),
            KeyCode::F(5) => self.run_snippet(),
            KeyCode::Tab => self.focused_pane = self.focused_pane.toggle(),
            _ => match self.focused_pane {
                FocusedPane::Editor => self.handle_editor_key(key, ctrl),
                FocusedPane::Results => self.handle_results_key(key),
            },
        }
    }

    fn handle_editor_key(&mut self, key: KeyEvent, ctrl: bool) {
        let editor = &mut self.playground.view_mut().editor;

        match key.code {
            KeyCode::Char(c) if !ctrl => editor.insert_char(c),
            KeyCode::Enter => editor.insert_newline(),
            KeyCode::Backspace => editor.backspace(),
            KeyCode::Delete => editor.delete(),
            KeyCode::Left => editor.move_left(),
            KeyCode::Right => editor.move_right(),
            KeyCode::Up => editor.move_up(),
            KeyCode::Down => editor.move_down(),
            KeyCode::Home => editor.move_home(),
            KeyCode::End => editor.move_end(),
            _ => {}
        }
    }

    fn handle_results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Up => self.results_scroll = self.results_scroll.saturating_sub(1),
            KeyCode::Down => self.results_scroll = self.results_scroll.saturating_add(1),
            _ => {}
        }
    }

    /// The run control: evaluate the editor text and report the outcome
    pub fn run_snippet(&mut self) {
        let result = self.playground.run();
        let runs = self.playground.runs();
        self.results_scroll = 0;

        match result {
            EvaluationResult::Value(_) => {
                self.run_state = RunState::Ok;
                self.status_message = format!("Run {} finished", runs);
            }
            EvaluationResult::Error(err) => {
                self.run_state = RunState::Error;
                self.status_message = match err.location() {
                    Some(loc) => format!(
                        "Run {} failed at line {}, column {}",
                        runs, loc.line, loc.column
                    ),
                    None => format!("Run {} failed", runs),
                };
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evaluator::Interpreter;
    use crate::ui::view::ResultsContent;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn new_app() -> App<Interpreter> {
        App::new(Interpreter::default(), &EditorSettings::default())
    }

    #[test]
    fn test_ctrl_r_runs_the_editor_text() {
        let mut app = new_app();
        app.handle_key_event(ctrl('r'));

        assert_eq!(
            app.playground.view().results,
            ResultsContent::Value("7".to_string())
        );
        assert_eq!(app.run_state, RunState::Ok);
        assert_eq!(app.status_message, "Run 1 finished");
    }

    #[test]
    fn test_typing_edits_the_buffer() {
        let mut app = new_app();
        for c in " * 2".chars() {
            app.handle_key_event(key(KeyCode::Char(c)));
        }
        assert!(app.playground.view().editor.value().ends_with("return (x + y); * 2"));

        app.handle_key_event(key(KeyCode::F(5)));
        assert_eq!(app.run_state, RunState::Error);
        assert!(app.status_message.starts_with("Run 1 failed at line 3"));
    }

    #[test]
    fn test_tab_moves_focus_and_keys_follow() {
        let mut app = new_app();
        app.handle_key_event(key(KeyCode::Tab));
        assert_eq!(app.focused_pane, FocusedPane::Results);

        // Characters are not inserted while the results pane has focus
        let before = app.playground.view().editor.value();
        app.handle_key_event(key(KeyCode::Char('z')));
        assert_eq!(app.playground.view().editor.value(), before);

        app.handle_key_event(key(KeyCode::Down));
        assert_eq!(app.results_scroll, 1);
    }

    #[test]
    fn test_quit_keys() {
        let mut app = new_app();
        app.handle_key_event(key(KeyCode::Esc));
        assert!(app.should_quit);

        let mut app = new_app();
        app.handle_key_event(ctrl('q'));
        assert!(app.should_quit);
    }
}
