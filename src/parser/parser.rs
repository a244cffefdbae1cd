use crate::evaluator::constants::{MAX_EXPRESSION_DEPTH, MAX_NESTING_DEPTH};
use crate::parser::ast::*;
use crate::parser::lexer::{LexError, Lexer, Token, TokenKind};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, Error)]
#[error("{message} (line {}, column {})", location.line, location.column)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Recursive descent parser for the snippet language
pub struct Parser {
    tokens: Vec<Token>,
    position: usize,

    /// Current recursion depth, bounded by `MAX_NESTING_DEPTH`
    depth: usize,

    /// Tree depth of the expression most recently built
    expr_depth: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
            depth: 0,
            expr_depth: 0,
        })
    }

    /// Parse the whole snippet as a list of top-level statements
    pub fn parse_program(&mut self) -> Result<Program, ParseError> {
        let mut program = Program::new();

        while !self.is_at_end() {
            program.body.push(self.parse_statement()?);
        }

        Ok(program)
    }

    // ===== Statements =====

    fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        self.nested(Self::parse_statement_body)
    }

    fn parse_statement_body(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();

        match self.peek().kind {
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let decl = self.parse_variable_declaration()?;
                self.consume_semicolon()?;
                Ok(decl)
            }
            TokenKind::LBrace => {
                self.advance();
                let body = self.parse_block_statements()?;
                Ok(Stmt::Block { body, location: loc })
            }
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            TokenKind::For => self.parse_for_statement(),
            TokenKind::Return => self.parse_return_statement(),
            TokenKind::Break => {
                self.advance();
                self.consume_semicolon()?;
                Ok(Stmt::Break { location: loc })
            }
            TokenKind::Continue => {
                self.advance();
                self.consume_semicolon()?;
                Ok(Stmt::Continue { location: loc })
            }
            TokenKind::Semicolon => {
                self.advance();
                Ok(Stmt::Empty { location: loc })
            }
            _ => {
                let expr = self.parse_expression()?;
                self.consume_semicolon()?;
                Ok(Stmt::Expression {
                    expr,
                    location: loc,
                })
            }
        }
    }

    /// Parse statements up to and including the closing '}'
    fn parse_block_statements(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut statements = Vec::new();

        while !self.check(&TokenKind::RBrace) && !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        self.expect_token(&TokenKind::RBrace, "Expected '}' after block")?;
        Ok(statements)
    }

    /// `var|let|const name [= init] (, name [= init])*` without the terminator
    fn parse_variable_declaration(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        let kind = match self.advance().kind {
            TokenKind::Var => DeclKind::Var,
            TokenKind::Let => DeclKind::Let,
            _ => DeclKind::Const,
        };

        let mut declarations = Vec::new();
        loop {
            let name_loc = self.current_location();
            let name = self.expect_identifier()?;

            let init = if self.match_token(&TokenKind::Eq) {
                Some(self.parse_assignment()?)
            } else if kind == DeclKind::Const {
                return Err(ParseError {
                    message: "Missing initializer in const declaration".to_string(),
                    location: name_loc,
                });
            } else {
                None
            };

            declarations.push(Declarator {
                name,
                init,
                location: name_loc,
            });

            if !self.match_token(&TokenKind::Comma) {
                break;
            }
        }

        Ok(Stmt::VarDecl {
            kind,
            declarations,
            location: loc,
        })
    }

    fn parse_if_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'if'

        self.expect_token(&TokenKind::LParen, "Expected '(' after 'if'")?;
        let condition = self.parse_expression()?;
        self.expect_token(&TokenKind::RParen, "Expected ')' after if condition")?;

        let then_branch = Box::new(self.parse_statement()?);
        let else_branch = if self.match_token(&TokenKind::Else) {
            Some(Box::new(self.parse_statement()?))
        } else {
            None
        };

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            location: loc,
        })
    }

    fn parse_while_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'while'

        self.expect_token(&TokenKind::LParen, "Expected '(' after 'while'")?;
        let condition = self.parse_expression()?;
        self.expect_token(&TokenKind::RParen, "Expected ')' after while condition")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::While {
            condition,
            body,
            location: loc,
        })
    }

    fn parse_for_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'for'

        self.expect_token(&TokenKind::LParen, "Expected '(' after 'for'")?;

        let init = if self.check(&TokenKind::Semicolon) {
            None
        } else if matches!(
            self.peek().kind,
            TokenKind::Var | TokenKind::Let | TokenKind::Const
        ) {
            Some(Box::new(self.parse_variable_declaration()?))
        } else {
            let init_loc = self.current_location();
            let expr = self.parse_expression()?;
            Some(Box::new(Stmt::Expression {
                expr,
                location: init_loc,
            }))
        };
        self.expect_token(&TokenKind::Semicolon, "Expected ';' after for initializer")?;

        let condition = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_token(&TokenKind::Semicolon, "Expected ';' after for condition")?;

        let update = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expression()?)
        };
        self.expect_token(&TokenKind::RParen, "Expected ')' after for clauses")?;

        let body = Box::new(self.parse_statement()?);

        Ok(Stmt::For {
            init,
            condition,
            update,
            body,
            location: loc,
        })
    }

    fn parse_return_statement(&mut self) -> Result<Stmt, ParseError> {
        let loc = self.current_location();
        self.advance(); // consume 'return'

        // A line break directly after `return` ends the statement
        let value = if self.check(&TokenKind::Semicolon)
            || self.check(&TokenKind::RBrace)
            || self.is_at_end()
            || self.current_location().line > loc.line
        {
            None
        } else {
            Some(self.parse_expression()?)
        };

        self.consume_semicolon()?;
        Ok(Stmt::Return {
            value,
            location: loc,
        })
    }

    /// Accept an explicit ';' or an automatically inserted one: before '}',
    /// at end of input, or when the next token starts a new line.
    fn consume_semicolon(&mut self) -> Result<(), ParseError> {
        if self.match_token(&TokenKind::Semicolon) {
            return Ok(());
        }
        if self.check(&TokenKind::RBrace)
            || self.is_at_end()
            || self.current_location().line > self.previous_location().line
        {
            return Ok(());
        }
        Err(ParseError {
            message: format!("Unexpected token {}", self.peek()),
            location: self.current_location(),
        })
    }

    // ===== Expressions (lowest to highest precedence) =====

    fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> Result<Expr, ParseError> {
        self.nested(Self::parse_assignment_body)
    }

    fn parse_assignment_body(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_ternary()?;

        let op = match self.peek().kind {
            TokenKind::Eq => AssignOp::Assign,
            TokenKind::PlusEq => AssignOp::AddAssign,
            TokenKind::MinusEq => AssignOp::SubAssign,
            TokenKind::StarEq => AssignOp::MulAssign,
            TokenKind::SlashEq => AssignOp::DivAssign,
            TokenKind::PercentEq => AssignOp::ModAssign,
            _ => return Ok(expr),
        };
        let loc = self.current_location();
        self.advance();

        let target = match expr {
            Expr::Variable(name, _) => name,
            _ => {
                return Err(ParseError {
                    message: "Invalid left-hand side in assignment".to_string(),
                    location: loc,
                })
            }
        };

        // Right-associative
        let value = self.parse_assignment()?;
        self.set_expr_depth(self.expr_depth + 1, loc)?;
        Ok(Expr::Assign {
            op,
            target,
            value: Box::new(value),
            location: loc,
        })
    }

    fn parse_ternary(&mut self) -> Result<Expr, ParseError> {
        let condition = self.parse_logical_or()?;

        if self.check(&TokenKind::Question) {
            let loc = self.current_location();
            self.advance();
            let condition_depth = self.expr_depth;
            let then_expr = self.parse_assignment()?;
            let then_depth = self.expr_depth;
            self.expect_token(&TokenKind::Colon, "Expected ':' in conditional expression")?;
            let else_expr = self.parse_assignment()?;
            let depth = condition_depth.max(then_depth).max(self.expr_depth) + 1;
            self.set_expr_depth(depth, loc)?;

            return Ok(Expr::Ternary {
                condition: Box::new(condition),
                then_expr: Box::new(then_expr),
                else_expr: Box::new(else_expr),
                location: loc,
            });
        }

        Ok(condition)
    }

    fn parse_logical_or(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_logical_and, |kind| match kind {
            TokenKind::OrOr => Some(BinOp::Or),
            _ => None,
        })
    }

    fn parse_logical_and(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_equality, |kind| match kind {
            TokenKind::AndAnd => Some(BinOp::And),
            _ => None,
        })
    }

    fn parse_equality(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_relational, |kind| match kind {
            TokenKind::EqEq => Some(BinOp::Eq),
            TokenKind::NotEq => Some(BinOp::Ne),
            TokenKind::EqEqEq => Some(BinOp::StrictEq),
            TokenKind::NotEqEq => Some(BinOp::StrictNe),
            _ => None,
        })
    }

    fn parse_relational(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_additive, |kind| match kind {
            TokenKind::Lt => Some(BinOp::Lt),
            TokenKind::Le => Some(BinOp::Le),
            TokenKind::Gt => Some(BinOp::Gt),
            TokenKind::Ge => Some(BinOp::Ge),
            _ => None,
        })
    }

    fn parse_additive(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_multiplicative, |kind| match kind {
            TokenKind::Plus => Some(BinOp::Add),
            TokenKind::Minus => Some(BinOp::Sub),
            _ => None,
        })
    }

    fn parse_multiplicative(&mut self) -> Result<Expr, ParseError> {
        self.parse_binary_level(Self::parse_unary, |kind| match kind {
            TokenKind::Star => Some(BinOp::Mul),
            TokenKind::Slash => Some(BinOp::Div),
            TokenKind::Percent => Some(BinOp::Mod),
            _ => None,
        })
    }

    /// One left-associative precedence level: `operand (op operand)*`
    fn parse_binary_level(
        &mut self,
        operand: fn(&mut Self) -> Result<Expr, ParseError>,
        operator: fn(&TokenKind) -> Option<BinOp>,
    ) -> Result<Expr, ParseError> {
        let mut left = operand(self)?;

        while let Some(op) = operator(&self.peek().kind) {
            let loc = self.current_location();
            self.advance();
            let left_depth = self.expr_depth;
            let right = operand(self)?;
            self.set_expr_depth(left_depth.max(self.expr_depth) + 1, loc)?;
            left = binary(op, left, right, loc);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();

        let op = match self.peek().kind {
            TokenKind::Minus => UnOp::Neg,
            TokenKind::Plus => UnOp::Plus,
            TokenKind::Bang => UnOp::Not,
            TokenKind::TypeOf => UnOp::TypeOf,
            TokenKind::PlusPlus => UnOp::PreInc,
            TokenKind::MinusMinus => UnOp::PreDec,
            _ => return self.parse_postfix(),
        };
        self.advance();

        let operand = self.nested(Self::parse_unary)?;
        if matches!(op, UnOp::PreInc | UnOp::PreDec) && !matches!(operand, Expr::Variable(..)) {
            return Err(ParseError {
                message: "Invalid left-hand side expression in prefix operation".to_string(),
                location: loc,
            });
        }

        self.set_expr_depth(self.expr_depth + 1, loc)?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(operand),
            location: loc,
        })
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_primary()?;

        // Postfix operators bind only on the same line
        let op = match self.peek().kind {
            TokenKind::PlusPlus => UnOp::PostInc,
            TokenKind::MinusMinus => UnOp::PostDec,
            _ => return Ok(expr),
        };
        if self.current_location().line > self.previous_location().line {
            return Ok(expr);
        }

        let loc = self.current_location();
        if !matches!(expr, Expr::Variable(..)) {
            return Err(ParseError {
                message: "Invalid left-hand side expression in postfix operation".to_string(),
                location: loc,
            });
        }
        self.advance();

        self.set_expr_depth(self.expr_depth + 1, loc)?;
        Ok(Expr::Unary {
            op,
            operand: Box::new(expr),
            location: loc,
        })
    }

    fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let loc = self.current_location();
        let token = self.peek().clone();

        let expr = match token.kind {
            TokenKind::Number(n) => Expr::Number(n, loc),
            TokenKind::Str(s) => Expr::Str(s, loc),
            TokenKind::True => Expr::Bool(true, loc),
            TokenKind::False => Expr::Bool(false, loc),
            TokenKind::Null => Expr::Null(loc),
            TokenKind::Undefined => Expr::Undefined(loc),
            TokenKind::Ident(name) => Expr::Variable(name, loc),
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect_token(&TokenKind::RParen, "Expected ')' after expression")?;
                return Ok(inner);
            }
            TokenKind::Eof => {
                return Err(ParseError {
                    message: "Unexpected end of input".to_string(),
                    location: loc,
                })
            }
            other => {
                return Err(ParseError {
                    message: format!("Unexpected token {}", other),
                    location: loc,
                })
            }
        };

        self.advance();
        self.expr_depth = 1;
        Ok(expr)
    }

    // ===== Nesting limits =====

    /// Run `parse` one level deeper, failing once `MAX_NESTING_DEPTH` is reached
    fn nested<T>(
        &mut self,
        parse: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(too_deep(self.current_location()));
        }
        self.depth += 1;
        let result = parse(self);
        self.depth -= 1;
        result
    }

    /// Record the depth of the node about to be built
    fn set_expr_depth(&mut self, depth: usize, location: SourceLocation) -> Result<(), ParseError> {
        if depth > MAX_EXPRESSION_DEPTH {
            return Err(too_deep(location));
        }
        self.expr_depth = depth;
        Ok(())
    }

    // ===== Helper methods =====

    fn match_token(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(&self.peek().kind) == std::mem::discriminant(kind)
    }

    fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    fn is_at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    fn previous_location(&self) -> SourceLocation {
        self.previous().location
    }

    fn current_location(&self) -> SourceLocation {
        self.peek().location
    }

    fn expect_token(&mut self, kind: &TokenKind, message: &str) -> Result<(), ParseError> {
        if self.check(kind) {
            self.advance();
            Ok(())
        } else {
            Err(ParseError {
                message: format!("{}, found {}", message, self.peek()),
                location: self.current_location(),
            })
        }
    }

    fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let TokenKind::Ident(name) = &self.peek().kind {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(ParseError {
                message: format!("Expected identifier, found {}", self.peek()),
                location: self.current_location(),
            })
        }
    }
}

fn binary(op: BinOp, left: Expr, right: Expr, location: SourceLocation) -> Expr {
    Expr::Binary {
        op,
        left: Box::new(left),
        right: Box::new(right),
        location,
    }
}

fn too_deep(location: SourceLocation) -> ParseError {
    ParseError {
        message: "Maximum nesting depth exceeded".to_string(),
        location,
    }
}

/// Parse a complete snippet in one call
pub fn parse(source: &str) -> Result<Program, ParseError> {
    Parser::new(source)?.parse_program()
}
