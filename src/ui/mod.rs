//! Terminal user interface built on [ratatui](https://github.com/ratatui-org/ratatui).
//!
//! The UI is organized into four layers:
//!
//! - **[`app`]**: application state, keyboard event loop, pane focus, run control
//! - **[`view`]**: [`TuiView`], the [`View`] the playground controller writes to
//! - **[`panes`]**: stateless render functions for the editor, results, and status bar
//! - **[`theme`]**: colour palettes for each [`ThemeName`]
//!
//! The entry point for consumers is [`App`]: construct it with an evaluator and
//! [`EditorSettings`], then call [`App::run`] to start the event loop.
//!
//! [`View`]: crate::playground::View
//! [`ThemeName`]: crate::editor::ThemeName
//! [`EditorSettings`]: crate::playground::EditorSettings
//! [`App::run`]: app::App::run

pub mod app;
pub mod panes;
pub mod theme;
pub mod view;

pub use app::App;
pub use view::TuiView;
