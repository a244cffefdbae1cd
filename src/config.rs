//! Command-line configuration

use crate::editor::{SyntaxMode, ThemeName};
use crate::evaluator::constants::DEFAULT_MAX_STEPS;
use crate::playground::{EditorSettings, SAMPLE_SNIPPET};
use anyhow::Context;
use clap::Parser;
use std::fs;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "playground")]
#[command(version)]
#[command(about = "Edit a code snippet in the terminal, run it, and read the result")]
pub struct Cli {
    /// File to load into the editor instead of the sample snippet
    pub file: Option<PathBuf>,

    /// Editor colour theme
    #[arg(long, value_enum, default_value_t = ThemeName::Monokai)]
    pub theme: ThemeName,

    /// Syntax highlighting mode
    #[arg(long, value_enum, default_value_t = SyntaxMode::JavaScript)]
    pub mode: SyntaxMode,

    /// Maximum statements plus loop iterations per run
    #[arg(long, default_value_t = DEFAULT_MAX_STEPS)]
    pub max_steps: u64,

    /// Write logs to this file (the TUI owns stdout and stderr)
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Run the snippet once, print the result, and exit
    #[arg(long)]
    pub headless: bool,
}

impl Cli {
    /// Editor settings, reading `file` when one was given
    pub fn editor_settings(&self) -> anyhow::Result<EditorSettings> {
        let initial_text = match &self.file {
            Some(path) => fs::read_to_string(path)
                .with_context(|| format!("failed to read '{}'", path.display()))?,
            None => SAMPLE_SNIPPET.to_string(),
        };

        Ok(EditorSettings {
            theme: self.theme,
            mode: self.mode,
            initial_text,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["playground"]).unwrap();

        assert_eq!(cli.theme, ThemeName::Monokai);
        assert_eq!(cli.mode, SyntaxMode::JavaScript);
        assert_eq!(cli.max_steps, DEFAULT_MAX_STEPS);
        assert!(!cli.headless);
        assert_eq!(cli.editor_settings().unwrap(), EditorSettings::default());
    }

    #[test]
    fn test_flags() {
        let cli = Cli::try_parse_from([
            "playground",
            "--theme",
            "mocha",
            "--mode",
            "plain-text",
            "--max-steps",
            "10",
            "--headless",
        ])
        .unwrap();

        assert_eq!(cli.theme, ThemeName::Mocha);
        assert_eq!(cli.mode, SyntaxMode::PlainText);
        assert_eq!(cli.max_steps, 10);
        assert!(cli.headless);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let cli = Cli::try_parse_from(["playground", "/definitely/not/here.js"]).unwrap();
        let err = cli.editor_settings().unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.js"));
    }

    #[test]
    fn test_verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
