//! Error Handling for the Erio Interpreter
//!
//! This module defines the error hierarchy shared by the lexer, parser, and
//! evaluator. Each phase of the pipeline fails with its own leaf kind; none
//! of them carry source position information (Erio does not track line or
//! column for diagnostics — see the lexer/parser contracts).
//!
//! ## Error Categories
//!
//! - **`LexerError`**: a completed lexeme could not be classified as any
//!   recognized token form.
//! - **`SyntaxError`**: the parser saw a token it could not use at the
//!   current position, or a `return` outside of any function body.
//! - **`RuntimeError`**: name-not-found, type mismatch inside a primitive,
//!   index out of range, or any other failure discovered while walking the
//!   AST.

use std::error::Error;
use std::fmt;

use crate::lexer::Token;

/// Comprehensive error type for all Erio language operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ErioError {
    /// A character accumulation could not be classified as any recognized
    /// token form (keyword, symbol, literal, or identifier).
    LexerError(String),

    /// The parser encountered an unexpected token, or a `return` outside
    /// any function body. Carries the offending token's debug text.
    SyntaxError(String),

    /// A runtime failure: undefined variable, type mismatch inside a
    /// primitive, index out of range, or an otherwise malformed AST shape.
    RuntimeError(String),
}

impl fmt::Display for ErioError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErioError::LexerError(msg) => write!(f, "lexer error: {}", msg),
            ErioError::SyntaxError(msg) => write!(f, "syntax error: {}", msg),
            ErioError::RuntimeError(msg) => write!(f, "runtime error: {}", msg),
        }
    }
}

impl Error for ErioError {}

impl ErioError {
    pub(crate) fn invalid_token(lexeme: impl Into<String>) -> Self {
        ErioError::LexerError(format!("invalid token '{}'", lexeme.into()))
    }

    pub(crate) fn unexpected_token(token: &Token) -> Self {
        ErioError::SyntaxError(format!("unexpected token {:?}", token))
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        ErioError::RuntimeError(msg.into())
    }
}

/// Convenience alias for Results that can contain `ErioError`.
pub type Result<T> = std::result::Result<T, ErioError>;
