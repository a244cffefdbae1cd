// Playground: edit a snippet, run it, read the result

use std::fs::File;
use std::io;
use std::process::ExitCode;
use std::sync::Mutex;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use playground::config::Cli;
use playground::evaluator::Interpreter;
use playground::playground::console::ConsoleView;
use playground::playground::Playground;
use playground::ui::App;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(&cli)?;

    let settings = cli.editor_settings()?;
    let interpreter = Interpreter::new(cli.max_steps);

    if cli.headless {
        let mut playground = Playground::new(ConsoleView::stdio(), interpreter);
        playground.initialize(&settings);
        playground.run();

        return Ok(if playground.view().failed() {
            ExitCode::FAILURE
        } else {
            ExitCode::SUCCESS
        });
    }

    let mut app = App::new(interpreter, &settings);

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = app.run(&mut terminal);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    res.context("terminal UI failed")?;
    tracing::info!(runs = app.playground.runs(), "playground closed");

    Ok(ExitCode::SUCCESS)
}

/// Logs go to stderr in headless mode. The TUI owns the screen, so there they
/// go to `--log-file` or nowhere.
fn init_logging(cli: &Cli) -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "playground=info".into());

    if let Some(path) = &cli.log_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create log file '{}'", path.display()))?;
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
            .init();
    } else if cli.headless {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init();
    }

    Ok(())
}
