//! Error types for snippet evaluation
//!
//! [`RuntimeError`] covers failures raised while executing a parsed snippet.
//! [`EvaluationError`] is the single error that crosses the
//! [`Evaluator`](super::Evaluator) seam: every lex, parse, and runtime failure
//! is converted into one, keeping only a human-readable message and an
//! optional location.

use crate::parser::ast::SourceLocation;
use crate::parser::ParseError;
use thiserror::Error;

/// Runtime errors that can occur during execution
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RuntimeError {
    /// Read of a name that was never declared
    #[error("{name} is not defined")]
    UndefinedVariable {
        name: String,
        location: SourceLocation,
    },

    /// Write to a `const` binding
    #[error("Assignment to constant variable.")]
    ConstAssignment {
        name: String,
        location: SourceLocation,
    },

    /// `let`/`const` declared twice in the same scope
    #[error("Identifier '{name}' has already been declared")]
    Redeclaration {
        name: String,
        location: SourceLocation,
    },

    /// Division or modulo by zero
    #[error("Division by zero")]
    DivisionByZero { location: SourceLocation },

    /// `break` or `continue` outside of a loop
    #[error("Illegal {keyword} statement")]
    IllegalJump {
        keyword: &'static str,
        location: SourceLocation,
    },

    /// The execution budget ran out
    #[error("Execution step limit of {limit} exceeded")]
    StepLimitExceeded { limit: u64 },

    /// The snippet produced `undefined` or `null`, which has no string form
    #[error("Cannot read properties of {kind} (reading 'toString')")]
    NoDisplayValue { kind: &'static str },
}

impl RuntimeError {
    pub fn location(&self) -> Option<SourceLocation> {
        match self {
            RuntimeError::UndefinedVariable { location, .. }
            | RuntimeError::ConstAssignment { location, .. }
            | RuntimeError::Redeclaration { location, .. }
            | RuntimeError::DivisionByZero { location }
            | RuntimeError::IllegalJump { location, .. } => Some(*location),
            RuntimeError::StepLimitExceeded { .. } | RuntimeError::NoDisplayValue { .. } => None,
        }
    }
}

/// A failed evaluation, carrying the message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct EvaluationError {
    message: String,
    location: Option<SourceLocation>,
}

impl EvaluationError {
    pub fn new(message: impl Into<String>) -> Self {
        EvaluationError {
            message: message.into(),
            location: None,
        }
    }

    pub fn at(message: impl Into<String>, location: SourceLocation) -> Self {
        EvaluationError {
            message: message.into(),
            location: Some(location),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn location(&self) -> Option<SourceLocation> {
        self.location
    }
}

impl From<ParseError> for EvaluationError {
    fn from(err: ParseError) -> Self {
        EvaluationError::at(err.message, err.location)
    }
}

impl From<RuntimeError> for EvaluationError {
    fn from(err: RuntimeError) -> Self {
        EvaluationError {
            message: err.to_string(),
            location: err.location(),
        }
    }
}
