//! Snippet source parser
//!
//! This module transforms editor text into an Abstract Syntax Tree (AST):
//! - [`lexer`]: Tokenization (source text → tokens)
//! - [`parser`]: Parsing (tokens → AST)
//! - [`ast`]: AST node definitions
//!
//! # Supported subset
//!
//! A small JavaScript-flavoured language:
//! - Declarations: `var`, `let`, `const`
//! - Statements: expression statements, blocks, `if`/`else`, `while`, `for`,
//!   `break`, `continue`, `return`
//! - Expressions: arithmetic, comparison (loose and strict), logical,
//!   ternary, assignment and compound assignment, `++`/`--`, `typeof`
//! - No functions, objects, or arrays
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser with precedence climbing for binary operators.

pub mod ast;
pub mod lexer;
pub mod parser;

pub use parser::{parse, ParseError, Parser};
