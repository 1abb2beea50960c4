//! Parser for the Erio Programming Language
//!
//! This module implements a recursive-descent parser with operator
//! precedence climbing to convert a stream of tokens into statement and
//! expression AST nodes. It uses exactly one token of lookahead: `current`
//! is the token under consideration, and peeking ahead never looks past
//! the next token.
//!
//! ## Statement Dispatch
//!
//! A statement is chosen entirely by `current.kind`, with one further
//! token of lookahead to disambiguate an `identifier` that starts either an
//! assignment or a call statement:
//!
//! - `if` / `while` / `def` / `return` dispatch directly.
//! - `identifier` followed by `=` is an assignment; followed by `(` is a
//!   call statement.
//!
//! ## Expression Precedence
//!
//! Lowest to highest precedence, each level left-associative except the two
//! prefix levels (which stack right-associatively by construction):
//!
//! ```text
//! or-expr   (or)
//! and-expr  (and)
//! not-expr  (not, prefix)
//! comp-expr (==, !=, <, >, <=, >=)
//! add-expr  (+, -)
//! mul-expr  (*, /, %)
//! sign-expr (+, -, prefix)
//! atom      (literals, identifiers, calls, sequences, parens)
//! ```
//!
//! Argument and parameter lists accept commas when present but do not
//! require them: the parser simply loops until it sees the closing token,
//! so `foo(a, b)` and `foo(a b)` parse identically. This mirrors the source
//! language's own parser and is a deliberate permissiveness, not an
//! oversight.

use crate::ast::*;
use crate::error::{ErioError, Result};
use crate::lexer::{Token, TokenKind};

pub struct Parser {
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Parser { tokens, current: 0 }
    }

    /// Parses the whole token stream into a top-level statement sequence.
    /// A `return` at top level is rejected here, since top-level code runs
    /// outside of any function body.
    pub fn parse(&mut self) -> Result<Block> {
        let mut statements = Vec::new();
        while !self.is_at_end() {
            if self.peek().kind == TokenKind::Return {
                return Err(ErioError::unexpected_token(self.peek()));
            }
            statements.push(self.statement()?);
        }
        Ok(statements)
    }

    // ---- token stream plumbing ----

    fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    fn peek_at(&self, offset: usize) -> &Token {
        let index = (self.current + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn advance(&mut self) -> Token {
        let token = self.tokens[self.current].clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(ErioError::unexpected_token(self.peek()))
        }
    }

    // ---- statements ----

    fn statement(&mut self) -> Result<Statement> {
        match self.peek().kind {
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Def => self.function_def(),
            TokenKind::Return => self.return_statement(),
            TokenKind::Identifier => {
                if self.peek_at(1).kind == TokenKind::Assignment {
                    self.assignment_statement()
                } else if self.peek_at(1).kind == TokenKind::OpenParen {
                    Ok(Statement::Call(self.call()?))
                } else {
                    Err(ErioError::unexpected_token(self.peek()))
                }
            }
            _ => Err(ErioError::unexpected_token(self.peek())),
        }
    }

    fn block_until(&mut self, terminators: &[TokenKind]) -> Result<Block> {
        let mut statements = Vec::new();
        while !terminators.contains(&self.peek().kind) {
            if self.is_at_end() {
                return Err(ErioError::unexpected_token(self.peek()));
            }
            statements.push(self.statement()?);
        }
        Ok(statements)
    }

    fn if_statement(&mut self) -> Result<Statement> {
        self.expect(TokenKind::If)?;
        let condition = self.expression()?;
        self.expect(TokenKind::Then)?;
        let then_block = self.block_until(&[TokenKind::Else, TokenKind::EndIf])?;
        let else_block = if self.check(TokenKind::Else) {
            self.advance();
            self.block_until(&[TokenKind::EndIf])?
        } else {
            Vec::new()
        };
        self.expect(TokenKind::EndIf)?;
        Ok(Statement::If {
            condition,
            then_block,
            else_block,
        })
    }

    fn while_statement(&mut self) -> Result<Statement> {
        self.expect(TokenKind::While)?;
        let condition = self.expression()?;
        self.expect(TokenKind::Do)?;
        let body = self.block_until(&[TokenKind::EndWhile])?;
        self.expect(TokenKind::EndWhile)?;
        Ok(Statement::While { condition, body })
    }

    fn function_def(&mut self) -> Result<Statement> {
        self.expect(TokenKind::Def)?;
        let name = self.expect(TokenKind::Identifier)?.lexeme;
        self.expect(TokenKind::OpenParen)?;
        let mut params = Vec::new();
        while !self.check(TokenKind::CloseParen) {
            params.push(self.expect(TokenKind::Identifier)?.lexeme);
            if self.check(TokenKind::Comma) {
                self.advance();
            }
        }
        self.expect(TokenKind::CloseParen)?;
        let body = self.block_until(&[TokenKind::EndDef])?;
        self.expect(TokenKind::EndDef)?;
        Ok(Statement::FunctionDef { name, params, body })
    }

    fn return_statement(&mut self) -> Result<Statement> {
        self.expect(TokenKind::Return)?;
        let value = self.expression()?;
        Ok(Statement::Return(value))
    }

    fn assignment_statement(&mut self) -> Result<Statement> {
        let name = self.expect(TokenKind::Identifier)?.lexeme;
        self.expect(TokenKind::Assignment)?;
        let value = self.expression()?;
        Ok(Statement::Assignment { name, value })
    }

    fn call(&mut self) -> Result<Call> {
        let callee = self.expect(TokenKind::Identifier)?.lexeme;
        self.expect(TokenKind::OpenParen)?;
        let mut args = Vec::new();
        while !self.check(TokenKind::CloseParen) {
            args.push(self.expression()?);
            if self.check(TokenKind::Comma) {
                self.advance();
            }
        }
        self.expect(TokenKind::CloseParen)?;
        Ok(Call { callee, args })
    }

    // ---- expressions, lowest precedence first ----

    fn expression(&mut self) -> Result<Expression> {
        self.or_expr()
    }

    fn or_expr(&mut self) -> Result<Expression> {
        let mut left = self.and_expr()?;
        while self.check(TokenKind::Or) {
            self.advance();
            let right = self.and_expr()?;
            left = Expression::Or {
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn and_expr(&mut self) -> Result<Expression> {
        let mut left = self.not_expr()?;
        while self.check(TokenKind::And) {
            self.advance();
            let right = self.not_expr()?;
            left = Expression::And {
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn not_expr(&mut self) -> Result<Expression> {
        if self.check(TokenKind::Not) {
            self.advance();
            let operand = self.not_expr()?;
            return Ok(Expression::Not(Box::new(operand)));
        }
        self.comp_expr()
    }

    fn comp_expr(&mut self) -> Result<Expression> {
        let mut left = self.add_expr()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Eq => CompOp::Eq,
                TokenKind::NotEq => CompOp::NotEq,
                TokenKind::Lt => CompOp::Lt,
                TokenKind::Gt => CompOp::Gt,
                TokenKind::Lteq => CompOp::Lteq,
                TokenKind::Gteq => CompOp::Gteq,
                _ => break,
            };
            self.advance();
            let right = self.add_expr()?;
            left = Expression::Comp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn add_expr(&mut self) -> Result<Expression> {
        let mut left = self.mul_expr()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Add => AddOp::Add,
                TokenKind::Sub => AddOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.mul_expr()?;
            left = Expression::Add {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn mul_expr(&mut self) -> Result<Expression> {
        let mut left = self.sign_expr()?;
        loop {
            let op = match self.peek().kind {
                TokenKind::Mul => MulOp::Mul,
                TokenKind::Div => MulOp::Div,
                TokenKind::Mod => MulOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.sign_expr()?;
            left = Expression::Mul {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }
        Ok(left)
    }

    fn sign_expr(&mut self) -> Result<Expression> {
        let op = match self.peek().kind {
            TokenKind::Add => Some(SignOp::Plus),
            TokenKind::Sub => Some(SignOp::Minus),
            _ => None,
        };
        if let Some(op) = op {
            self.advance();
            let operand = self.sign_expr()?;
            return Ok(Expression::Sign {
                op,
                operand: Box::new(operand),
            });
        }
        self.atom()
    }

    fn atom(&mut self) -> Result<Expression> {
        match self.peek().kind {
            TokenKind::Integer => {
                let token = self.advance();
                let value: i64 = token
                    .lexeme
                    .parse()
                    .map_err(|_| ErioError::runtime(format!("invalid integer literal '{}'", token.lexeme)))?;
                Ok(Expression::Constant(Constant::Integer(value)))
            }
            TokenKind::Boolean => {
                let token = self.advance();
                Ok(Expression::Constant(Constant::Boolean(token.lexeme == "true")))
            }
            TokenKind::String => {
                let token = self.advance();
                let inner = token.lexeme[1..token.lexeme.len() - 1].to_string();
                Ok(Expression::Constant(Constant::String(inner)))
            }
            TokenKind::Identifier => {
                if self.peek_at(1).kind == TokenKind::OpenParen {
                    Ok(Expression::Call(self.call()?))
                } else {
                    let token = self.advance();
                    Ok(Expression::Variable(token.lexeme))
                }
            }
            TokenKind::OpenBracket => {
                self.advance();
                let mut elements = Vec::new();
                while !self.check(TokenKind::CloseBracket) {
                    elements.push(self.expression()?);
                    if self.check(TokenKind::Comma) {
                        self.advance();
                    }
                }
                self.expect(TokenKind::CloseBracket)?;
                Ok(Expression::Sequence(elements))
            }
            TokenKind::OpenParen => {
                self.advance();
                let inner = self.expression()?;
                self.expect(TokenKind::CloseParen)?;
                Ok(inner)
            }
            _ => Err(ErioError::unexpected_token(self.peek())),
        }
    }
}
