// Constants for the snippet evaluator

/// Default execution budget: statements executed plus loop iterations.
/// Keeps a runaway `while (true)` from freezing the UI thread.
pub const DEFAULT_MAX_STEPS: u64 = 1_000_000;

/// Deepest parser recursion allowed: nested statements, parentheses,
/// prefix operators and right-hand sides of assignments or ternaries.
pub const MAX_NESTING_DEPTH: usize = 128;

/// Deepest expression tree the parser will build. Long operator chains grow
/// the tree without recursing in the parser, but evaluation walks it
/// recursively.
pub const MAX_EXPRESSION_DEPTH: usize = 512;
