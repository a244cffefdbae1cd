//! Snippet evaluation
//!
//! - [`Evaluator`]: the capability the playground controller is built against
//! - [`engine`]: [`Interpreter`], the bundled tree-walking evaluator
//! - [`value`]: runtime values and their string rendering
//! - [`errors`]: [`RuntimeError`] and the boundary type [`EvaluationError`]
//!
//! # Execution Model
//!
//! A run parses the editor text, executes it against a fresh global scope and
//! yields either a displayable value or an error message. Every statement and
//! loop iteration counts against a step budget so a runaway loop ends with an
//! error instead of hanging the UI.

pub mod constants;
pub mod engine;
pub mod errors;
mod ops;
pub mod value;

use std::fmt;

pub use engine::Interpreter;
pub use errors::{EvaluationError, RuntimeError};
pub use value::Value;

/// Evaluate code text and return a value or a descriptive error.
pub trait Evaluator {
    /// What a successful evaluation produces; shown through its `Display` impl
    type Output: fmt::Display;

    fn evaluate(&mut self, code: &str) -> Result<Self::Output, EvaluationError>;
}
