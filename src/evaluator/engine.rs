// Execution engine for playground snippets

use crate::evaluator::constants::DEFAULT_MAX_STEPS;
use crate::evaluator::errors::{EvaluationError, RuntimeError};
use crate::evaluator::value::Value;
use crate::evaluator::Evaluator;
use crate::parser::ast::*;
use crate::parser::parse;
use rustc_hash::FxHashMap;
use tracing::debug;

/// A variable slot in a scope
#[derive(Debug, Clone)]
struct Binding {
    value: Value,
    kind: DeclKind,
}

/// How a statement finished
#[derive(Debug)]
enum Flow {
    Normal,
    Break(SourceLocation),
    Continue(SourceLocation),
    Return(Value),
}

/// Tree-walking interpreter for snippets.
///
/// Each call to [`Interpreter::run`] starts from a fresh global scope, so
/// running the same snippet twice yields the same value.
#[derive(Debug)]
pub struct Interpreter {
    /// Scope chain; index 0 is the global (`var`) scope
    scopes: Vec<FxHashMap<String, Binding>>,

    /// Statements and loop iterations executed in the current run
    steps: u64,

    /// Execution budget per run
    max_steps: u64,
}

impl Default for Interpreter {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_STEPS)
    }
}

impl Interpreter {
    pub fn new(max_steps: u64) -> Self {
        Interpreter {
            scopes: vec![FxHashMap::default()],
            steps: 0,
            max_steps,
        }
    }

    pub fn max_steps(&self) -> u64 {
        self.max_steps
    }

    /// Steps used by the most recent run
    pub fn steps(&self) -> u64 {
        self.steps
    }

    /// Execute a parsed program and return its result.
    ///
    /// The result is the value of a top-level `return`, or else the value of
    /// the last expression statement executed (`undefined` if there was none).
    pub fn run(&mut self, program: &Program) -> Result<Value, RuntimeError> {
        self.scopes = vec![FxHashMap::default()];
        self.steps = 0;

        let mut completion = Value::Undefined;
        for stmt in &program.body {
            match self.execute_statement(stmt, &mut completion)? {
                Flow::Normal => {}
                Flow::Return(value) => return Ok(value),
                Flow::Break(location) => {
                    return Err(RuntimeError::IllegalJump {
                        keyword: "break",
                        location,
                    })
                }
                Flow::Continue(location) => {
                    return Err(RuntimeError::IllegalJump {
                        keyword: "continue",
                        location,
                    })
                }
            }
        }

        Ok(completion)
    }

    /// Count one unit of work against the budget
    fn tick(&mut self) -> Result<(), RuntimeError> {
        self.steps += 1;
        if self.steps > self.max_steps {
            return Err(RuntimeError::StepLimitExceeded {
                limit: self.max_steps,
            });
        }
        Ok(())
    }

    fn execute_statement(
        &mut self,
        stmt: &Stmt,
        completion: &mut Value,
    ) -> Result<Flow, RuntimeError> {
        self.tick()?;

        match stmt {
            Stmt::VarDecl {
                kind, declarations, ..
            } => {
                for decl in declarations {
                    let value = match &decl.init {
                        Some(init) => Some(self.evaluate_expression(init)?),
                        None => None,
                    };
                    self.declare(*kind, &decl.name, value, decl.location)?;
                }
                Ok(Flow::Normal)
            }
            Stmt::Expression { expr, .. } => {
                *completion = self.evaluate_expression(expr)?;
                Ok(Flow::Normal)
            }
            Stmt::Block { body, .. } => self.execute_block(body, completion),
            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                if self.evaluate_expression(condition)?.is_truthy() {
                    self.execute_statement(then_branch, completion)
                } else if let Some(else_branch) = else_branch {
                    self.execute_statement(else_branch, completion)
                } else {
                    Ok(Flow::Normal)
                }
            }
            Stmt::While {
                condition, body, ..
            } => {
                loop {
                    self.tick()?;
                    if !self.evaluate_expression(condition)?.is_truthy() {
                        break;
                    }
                    match self.execute_statement(body, completion)? {
                        Flow::Break(_) => break,
                        Flow::Continue(_) | Flow::Normal => {}
                        flow @ Flow::Return(_) => return Ok(flow),
                    }
                }
                Ok(Flow::Normal)
            }
            Stmt::For {
                init,
                condition,
                update,
                body,
                ..
            } => {
                self.push_scope();
                let result = self.execute_for(
                    init.as_deref(),
                    condition.as_ref(),
                    update.as_ref(),
                    body,
                    completion,
                );
                self.pop_scope();
                result
            }
            Stmt::Break { location } => Ok(Flow::Break(*location)),
            Stmt::Continue { location } => Ok(Flow::Continue(*location)),
            Stmt::Return { value, .. } => {
                let value = match value {
                    Some(expr) => self.evaluate_expression(expr)?,
                    None => Value::Undefined,
                };
                Ok(Flow::Return(value))
            }
            Stmt::Empty { .. } => Ok(Flow::Normal),
        }
    }

    fn execute_block(
        &mut self,
        body: &[Stmt],
        completion: &mut Value,
    ) -> Result<Flow, RuntimeError> {
        self.push_scope();
        let result = self.execute_sequence(body, completion);
        self.pop_scope();
        result
    }

    fn execute_sequence(
        &mut self,
        body: &[Stmt],
        completion: &mut Value,
    ) -> Result<Flow, RuntimeError> {
        for stmt in body {
            match self.execute_statement(stmt, completion)? {
                Flow::Normal => {}
                flow => return Ok(flow),
            }
        }
        Ok(Flow::Normal)
    }

    fn execute_for(
        &mut self,
        init: Option<&Stmt>,
        condition: Option<&Expr>,
        update: Option<&Expr>,
        body: &Stmt,
        completion: &mut Value,
    ) -> Result<Flow, RuntimeError> {
        if let Some(init) = init {
            // The initializer's value is not a completion value
            let mut discarded = Value::Undefined;
            self.execute_statement(init, &mut discarded)?;
        }

        loop {
            self.tick()?;
            if let Some(condition) = condition {
                if !self.evaluate_expression(condition)?.is_truthy() {
                    break;
                }
            }

            match self.execute_statement(body, completion)? {
                Flow::Break(_) => break,
                Flow::Continue(_) | Flow::Normal => {}
                flow @ Flow::Return(_) => return Ok(flow),
            }

            if let Some(update) = update {
                self.evaluate_expression(update)?;
            }
        }

        Ok(Flow::Normal)
    }

    fn evaluate_expression(&mut self, expr: &Expr) -> Result<Value, RuntimeError> {
        match expr {
            Expr::Number(n, _) => Ok(Value::Number(*n)),
            Expr::Str(s, _) => Ok(Value::Str(s.clone())),
            Expr::Bool(b, _) => Ok(Value::Bool(*b)),
            Expr::Null(_) => Ok(Value::Null),
            Expr::Undefined(_) => Ok(Value::Undefined),
            Expr::Variable(name, location) => self.lookup(name, *location),
            Expr::Binary {
                op: BinOp::And,
                left,
                right,
                ..
            } => {
                let left = self.evaluate_expression(left)?;
                if left.is_truthy() {
                    self.evaluate_expression(right)
                } else {
                    Ok(left)
                }
            }
            Expr::Binary {
                op: BinOp::Or,
                left,
                right,
                ..
            } => {
                let left = self.evaluate_expression(left)?;
                if left.is_truthy() {
                    Ok(left)
                } else {
                    self.evaluate_expression(right)
                }
            }
            Expr::Binary {
                op,
                left,
                right,
                location,
            } => {
                let left = self.evaluate_expression(left)?;
                let right = self.evaluate_expression(right)?;
                self.apply_binary(*op, &left, &right, *location)
            }
            Expr::Unary {
                op,
                operand,
                location,
            } => self.evaluate_unary(*op, operand, *location),
            Expr::Assign {
                op,
                target,
                value,
                location,
            } => {
                let rhs = self.evaluate_expression(value)?;
                let new_value = match op.binary_op() {
                    None => rhs,
                    Some(bin_op) => {
                        let current = self.lookup(target, *location)?;
                        self.apply_binary(bin_op, &current, &rhs, *location)?
                    }
                };
                self.assign(target, new_value.clone(), *location)?;
                Ok(new_value)
            }
            Expr::Ternary {
                condition,
                then_expr,
                else_expr,
                ..
            } => {
                if self.evaluate_expression(condition)?.is_truthy() {
                    self.evaluate_expression(then_expr)
                } else {
                    self.evaluate_expression(else_expr)
                }
            }
        }
    }

    fn evaluate_unary(
        &mut self,
        op: UnOp,
        operand: &Expr,
        location: SourceLocation,
    ) -> Result<Value, RuntimeError> {
        match op {
            UnOp::Neg => Ok(Value::Number(-self.evaluate_expression(operand)?.to_number())),
            UnOp::Plus => Ok(Value::Number(self.evaluate_expression(operand)?.to_number())),
            UnOp::Not => Ok(Value::Bool(!self.evaluate_expression(operand)?.is_truthy())),
            UnOp::TypeOf => {
                // typeof on an undeclared name is "undefined", not an error
                if let Expr::Variable(name, _) = operand {
                    if self.find_binding(name).is_none() {
                        return Ok(Value::from("undefined"));
                    }
                }
                Ok(Value::from(self.evaluate_expression(operand)?.type_of()))
            }
            UnOp::PreInc | UnOp::PreDec | UnOp::PostInc | UnOp::PostDec => {
                let Expr::Variable(name, var_location) = operand else {
                    return Err(RuntimeError::UndefinedVariable {
                        name: String::from("<expression>"),
                        location,
                    });
                };

                let old = self.lookup(name, *var_location)?.to_number();
                let new = match op {
                    UnOp::PreInc | UnOp::PostInc => old + 1.0,
                    _ => old - 1.0,
                };
                self.assign(name, Value::Number(new), location)?;

                Ok(Value::Number(match op {
                    UnOp::PreInc | UnOp::PreDec => new,
                    _ => old,
                }))
            }
        }
    }

    // ===== Scopes =====

    fn push_scope(&mut self) {
        self.scopes.push(FxHashMap::default());
    }

    fn pop_scope(&mut self) {
        // The global scope is never popped
        if self.scopes.len() > 1 {
            self.scopes.pop();
        }
    }

    fn declare(
        &mut self,
        kind: DeclKind,
        name: &str,
        value: Option<Value>,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        let scope_index = match kind {
            DeclKind::Var => 0,
            DeclKind::Let | DeclKind::Const => self.scopes.len() - 1,
        };
        let scope = &mut self.scopes[scope_index];

        if let Some(existing) = scope.get_mut(name) {
            if kind != DeclKind::Var || existing.kind != DeclKind::Var {
                return Err(RuntimeError::Redeclaration {
                    name: name.to_string(),
                    location,
                });
            }
            // `var x;` on an existing var keeps its value
            if let Some(value) = value {
                existing.value = value;
            }
            return Ok(());
        }

        scope.insert(
            name.to_string(),
            Binding {
                value: value.unwrap_or_default(),
                kind,
            },
        );
        Ok(())
    }

    fn find_binding(&self, name: &str) -> Option<&Binding> {
        self.scopes.iter().rev().find_map(|scope| scope.get(name))
    }

    fn lookup(&self, name: &str, location: SourceLocation) -> Result<Value, RuntimeError> {
        self.find_binding(name)
            .map(|binding| binding.value.clone())
            .ok_or_else(|| RuntimeError::UndefinedVariable {
                name: name.to_string(),
                location,
            })
    }

    /// Assign to the innermost binding of `name`. An undeclared name becomes a
    /// global, as a sloppy-mode host would do.
    fn assign(
        &mut self,
        name: &str,
        value: Value,
        location: SourceLocation,
    ) -> Result<(), RuntimeError> {
        for scope in self.scopes.iter_mut().rev() {
            if let Some(binding) = scope.get_mut(name) {
                if binding.kind == DeclKind::Const {
                    return Err(RuntimeError::ConstAssignment {
                        name: name.to_string(),
                        location,
                    });
                }
                binding.value = value;
                return Ok(());
            }
        }

        self.scopes[0].insert(
            name.to_string(),
            Binding {
                value,
                kind: DeclKind::Var,
            },
        );
        Ok(())
    }
}

impl Evaluator for Interpreter {
    type Output = Value;

    fn evaluate(&mut self, code: &str) -> Result<Value, EvaluationError> {
        let program = parse(code)?;
        let value = self.run(&program)?;
        debug!(steps = self.steps, "snippet finished");

        // Rendering calls toString on the result, which null and undefined lack
        match value {
            Value::Undefined => Err(RuntimeError::NoDisplayValue { kind: "undefined" }.into()),
            Value::Null => Err(RuntimeError::NoDisplayValue { kind: "null" }.into()),
            value => Ok(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(source: &str) -> Result<Value, RuntimeError> {
        let program = parse(source).expect("Parsing failed");
        Interpreter::default().run(&program)
    }

    #[test]
    fn test_sample_snippet() {
        assert_eq!(
            run("var x = 3;\nvar y = 4;\nreturn (x + y);").unwrap(),
            Value::Number(7.0)
        );
    }

    #[test]
    fn test_completion_value_without_return() {
        assert_eq!(run("var a = 2; a * 21").unwrap(), Value::Number(42.0));
        assert_eq!(run("var a = 2;").unwrap(), Value::Undefined);
    }

    #[test]
    fn test_block_scoping() {
        let source = "let a = 1; { let a = 2; } a";
        assert_eq!(run(source).unwrap(), Value::Number(1.0));

        let source = "{ var v = 5; } v";
        assert_eq!(run(source).unwrap(), Value::Number(5.0));
    }

    #[test]
    fn test_let_redeclaration() {
        let err = run("let a = 1; let a = 2;").unwrap_err();
        assert_eq!(err.to_string(), "Identifier 'a' has already been declared");
    }

    #[test]
    fn test_var_redeclaration_keeps_value() {
        assert_eq!(run("var a = 1; var a; a").unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_const_assignment() {
        let err = run("const k = 1;\nk = 2;").unwrap_err();
        assert_eq!(err.to_string(), "Assignment to constant variable.");
        assert_eq!(err.location(), Some(SourceLocation::new(2, 3)));
    }

    #[test]
    fn test_undefined_variable() {
        let err = run("return nope + 1;").unwrap_err();
        assert_eq!(err.to_string(), "nope is not defined");
    }

    #[test]
    fn test_undeclared_assignment_creates_global() {
        assert_eq!(run("g = 4; g + 1").unwrap(), Value::Number(5.0));
    }

    #[test]
    fn test_loops() {
        let source = r#"
            var total = 0;
            for (let i = 0; i < 5; i++) {
                if (i == 3) continue;
                total += i;
            }
            var n = 0;
            while (true) {
                n++;
                if (n >= 10) break;
            }
            return total + n;
        "#;
        assert_eq!(run(source).unwrap(), Value::Number(17.0));
    }

    #[test]
    fn test_return_inside_loop() {
        let source = "for (var i = 0; ; i++) { if (i * i > 50) return i; }";
        assert_eq!(run(source).unwrap(), Value::Number(8.0));
    }

    #[test]
    fn test_short_circuit_returns_operands() {
        assert_eq!(run("0 || 'fallback'").unwrap(), Value::from("fallback"));
        assert_eq!(run("'' && missing").unwrap(), Value::from(""));
    }

    #[test]
    fn test_increments() {
        assert_eq!(run("var i = 1; var j = i++; j * 10 + i").unwrap(), Value::Number(12.0));
        assert_eq!(run("var i = 1; --i").unwrap(), Value::Number(0.0));
    }

    #[test]
    fn test_typeof() {
        assert_eq!(run("typeof 1").unwrap(), Value::from("number"));
        assert_eq!(run("typeof null").unwrap(), Value::from("object"));
        assert_eq!(run("typeof missing").unwrap(), Value::from("undefined"));
    }

    #[test]
    fn test_illegal_break() {
        let err = run("break;").unwrap_err();
        assert_eq!(err.to_string(), "Illegal break statement");
    }

    #[test]
    fn test_step_limit() {
        let program = parse("while (true) {}").unwrap();
        let mut interpreter = Interpreter::new(1_000);
        let err = interpreter.run(&program).unwrap_err();

        assert_eq!(err, RuntimeError::StepLimitExceeded { limit: 1_000 });
        assert_eq!(err.to_string(), "Execution step limit of 1000 exceeded");
    }

    #[test]
    fn test_runs_are_independent() {
        let program = parse("var c = (typeof c == 'undefined') ? 1 : c + 1; c").unwrap();
        let mut interpreter = Interpreter::default();

        assert_eq!(interpreter.run(&program).unwrap(), Value::Number(1.0));
        assert_eq!(interpreter.run(&program).unwrap(), Value::Number(1.0));
    }

    #[test]
    fn test_evaluate_rejects_undefined_result() {
        let err = Interpreter::default().evaluate("var a = 1;").unwrap_err();
        assert_eq!(
            err.message(),
            "Cannot read properties of undefined (reading 'toString')"
        );

        let err = Interpreter::default().evaluate("null").unwrap_err();
        assert_eq!(err.message(), "Cannot read properties of null (reading 'toString')");
    }

    #[test]
    fn test_evaluate_reports_parse_errors() {
        let err = Interpreter::default().evaluate("return (1 + ;").unwrap_err();
        assert_eq!(err.message(), "Unexpected token ';'");
        assert_eq!(err.location(), Some(SourceLocation::new(1, 13)));
    }
}
