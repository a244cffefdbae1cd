//! # Introduction
//!
//! Playground is a terminal code scratchpad: an editor pane preloaded with a
//! sample snippet, a run key, and a results pane that shows either the value
//! the snippet produced or the error it raised.
//!
//! ## Pipeline
//!
//! ```text
//! Editor text → Lexer → Parser → AST → Interpreter → Value | EvaluationError → View
//! ```
//!
//! 1. [`playground`]: the controller. [`playground::Playground`] is generic over
//!    a [`playground::View`] and an [`evaluator::Evaluator`], so it runs the
//!    same against the terminal UI, a headless console, or a test double.
//! 2. [`editor`]: the editor widget's state (text, cursor, theme, syntax mode).
//! 3. [`parser`]: tokenises snippet text and builds an AST.
//! 4. [`evaluator`]: walks the AST under a step budget and produces a
//!    [`evaluator::Value`] or an [`evaluator::EvaluationError`].
//! 5. [`ui`]: ratatui-based TUI; not part of the stable library API.
//! 6. [`config`]: command-line options.
//!
//! ## Supported snippet language
//!
//! Numbers, strings, booleans, `null`, `undefined`; `var`/`let`/`const`;
//! `if/else`, `while`, `for`, `break`, `continue`, `return`; arithmetic,
//! comparison, logical, ternary, assignment, `++`/`--`, `typeof`.

pub mod config;
pub mod editor;
pub mod evaluator;
pub mod parser;
pub mod playground;
pub mod ui;
