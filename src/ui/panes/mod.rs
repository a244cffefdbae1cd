//! TUI pane rendering modules
//!
//! - [`editor`]: editor buffer with line numbers, syntax highlighting and cursor
//! - [`results`]: value or error message from the last run
//! - [`status`]: status bar with run state and keybindings
//!
//! Each pane exports one stateless `render_*` function; scroll offsets live
//! in [`App`](crate::ui::App) and are passed in by reference.

pub mod editor;
pub mod results;
pub mod status;

pub use editor::render_editor_pane;
pub use results::render_results_pane;
pub use status::{render_status_bar, RunState};
