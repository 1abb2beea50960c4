//! Erio: a small dynamically typed imperative language with a tree-walking
//! interpreter.
//!
//! The pipeline is three stages, consumed leaf-first: [`lexer::tokenize`]
//! turns source text into tokens, [`parser::Parser`] turns tokens into a
//! top-level statement sequence, and [`interpreter::Interpreter`] walks
//! that sequence against a mutable environment, writing program output to
//! a caller-supplied sink.
//!
//! [`run_to_sink`] and [`run_to_string`] compose the three stages for
//! embedders; the `erio` binary is a thin CLI wrapper around
//! [`run_to_sink`] over standard input and standard output.

pub mod ast;
pub mod builtins;
pub mod environment;
pub mod error;
pub mod interpreter;
pub mod lexer;
pub mod parser;
pub mod value;

use std::io::Write;

pub use error::{ErioError, Result};
use interpreter::Interpreter;
use parser::Parser;

/// Lexes, parses, and evaluates `source`, writing program output to `sink`.
pub fn run_to_sink(source: &str, sink: &mut dyn Write) -> Result<()> {
    let tokens = lexer::tokenize(source)?;
    let program = Parser::new(tokens).parse()?;
    let interpreter = Interpreter::new();
    interpreter.run(&program, sink)
}

/// Convenience wrapper that captures output into a `String` instead of
/// requiring the caller to supply a sink. Output is required to be valid
/// UTF-8.
pub fn run_to_string(source: &str) -> Result<String> {
    let mut buffer = Vec::new();
    run_to_sink(source, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| ErioError::runtime(format!("output was not valid UTF-8: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_to_string_executes_a_program() {
        assert_eq!(run_to_string(r#"print("hello world")"#).unwrap(), "hello world");
    }

    #[test]
    fn run_to_string_surfaces_syntax_errors() {
        let err = run_to_string("return 1").unwrap_err();
        assert!(matches!(err, ErioError::SyntaxError(_)));
    }
}
