//! Lexical Analyzer for the Erio Programming Language
//!
//! This module implements the tokenization phase of the Erio interpretation
//! pipeline. It converts raw source text into a stream of tokens that the
//! parser consumes one at a time.
//!
//! ## Tokenization Process
//!
//! The lexer performs a single character-by-character pass:
//! 1. **Buffer accumulation**: characters are appended to a growing buffer.
//! 2. **Boundary detection**: the buffer is flushed into a token whenever
//!    whitespace, the start of a symbol, or a string's closing quote is seen.
//! 3. **Classification**: a completed lexeme is classified, in order, as a
//!    keyword, a symbol, a boolean, an identifier, an integer, or a string.
//!    A lexeme matching none of these is an `InvalidToken` error.
//!
//! ## Design Notes
//!
//! Erio has no comments and does not track source position in errors —
//! there is no line/column bookkeeping here at all. The lexer is otherwise
//! a direct port of the buffer-boundary algorithm described in the language
//! specification: it watches for multi-character symbols (`==`, `>=`, ...),
//! guards the hyphen in `end-if`/`end-while`/`end-def` so it isn't treated
//! as the `sub` symbol, and treats `"..."` as an opaque run that swallows
//! everything (including whitespace and symbol characters) until the
//! closing quote.

use crate::error::{ErioError, Result};

/// The kind of a token, independent of its source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Keywords — kind equals keyword text.
    If,
    Then,
    Else,
    EndIf,
    While,
    Do,
    EndWhile,
    Def,
    EndDef,
    Return,
    Or,
    And,
    Not,

    // Symbols.
    OpenParen,
    CloseParen,
    Comma,
    Assignment,
    OpenBracket,
    CloseBracket,
    Gt,
    Lt,
    Gteq,
    Lteq,
    Eq,
    NotEq,
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // Literals and identifiers.
    Integer,
    Boolean,
    String,
    Identifier,

    /// End-of-stream sentinel. Always the last token produced.
    Eof,
}

/// A single token: a `kind` and the verbatim source text it was built from.
///
/// For literals, `lexeme` is the raw source text (a quoted string keeps its
/// surrounding quotes; the evaluator strips them when materializing a
/// runtime value). For keywords and symbols, `lexeme` is the token's own
/// spelling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
}

impl Token {
    fn new(kind: TokenKind, lexeme: impl Into<String>) -> Self {
        Token {
            kind,
            lexeme: lexeme.into(),
        }
    }

    pub(crate) fn eof() -> Self {
        Token::new(TokenKind::Eof, "")
    }
}

const QUOTE: char = '"';

fn keyword_kind(text: &str) -> Option<TokenKind> {
    Some(match text {
        "if" => TokenKind::If,
        "then" => TokenKind::Then,
        "else" => TokenKind::Else,
        "end-if" => TokenKind::EndIf,
        "while" => TokenKind::While,
        "do" => TokenKind::Do,
        "end-while" => TokenKind::EndWhile,
        "def" => TokenKind::Def,
        "end-def" => TokenKind::EndDef,
        "return" => TokenKind::Return,
        "or" => TokenKind::Or,
        "and" => TokenKind::And,
        "not" => TokenKind::Not,
        _ => return None,
    })
}

fn symbol_kind(text: &str) -> Option<TokenKind> {
    Some(match text {
        "(" => TokenKind::OpenParen,
        ")" => TokenKind::CloseParen,
        "," => TokenKind::Comma,
        "=" => TokenKind::Assignment,
        "[" => TokenKind::OpenBracket,
        "]" => TokenKind::CloseBracket,
        ">" => TokenKind::Gt,
        "<" => TokenKind::Lt,
        ">=" => TokenKind::Gteq,
        "<=" => TokenKind::Lteq,
        "==" => TokenKind::Eq,
        "!=" => TokenKind::NotEq,
        "+" => TokenKind::Add,
        "-" => TokenKind::Sub,
        "*" => TokenKind::Mul,
        "/" => TokenKind::Div,
        "%" => TokenKind::Mod,
        _ => return None,
    })
}

fn is_symbol(text: &str) -> bool {
    symbol_kind(text).is_some()
}

/// First characters of every recognized symbol — used to detect whether an
/// incoming character *could* start a new symbol and should therefore close
/// out whatever is currently buffered.
fn symbol_start_chars() -> &'static [char] {
    &[
        '(', ')', ',', '=', '[', ']', '>', '<', '+', '-', '*', '/', '%', '!',
    ]
}

fn is_valid_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_alphanumeric() || c == '_')
}

fn is_integer_literal(text: &str) -> bool {
    !text.is_empty() && text.chars().all(|c| c.is_ascii_digit())
}

fn is_string_literal(text: &str) -> bool {
    text.len() >= 2
        && text.starts_with(QUOTE)
        && text.ends_with(QUOTE)
        && text.chars().all(|c| !c.is_control())
}

/// Classifies a completed lexeme into a `Token`, in the precedence order
/// keyword → symbol → boolean → identifier → integer → string.
fn make_token(lexeme: String) -> Result<Token> {
    if let Some(kind) = keyword_kind(&lexeme) {
        return Ok(Token::new(kind, lexeme));
    }
    if let Some(kind) = symbol_kind(&lexeme) {
        return Ok(Token::new(kind, lexeme));
    }
    if lexeme == "true" || lexeme == "false" {
        return Ok(Token::new(TokenKind::Boolean, lexeme));
    }
    if is_valid_identifier(&lexeme) {
        return Ok(Token::new(TokenKind::Identifier, lexeme));
    }
    if is_integer_literal(&lexeme) {
        return Ok(Token::new(TokenKind::Integer, lexeme));
    }
    if is_string_literal(&lexeme) {
        return Ok(Token::new(TokenKind::String, lexeme));
    }
    Err(ErioError::invalid_token(lexeme))
}

/// Tokenizes a source string into a `Vec<Token>`, terminated by `Eof`.
///
/// Maintains a growing `buffer` and an `in_string` flag exactly as the
/// language specification describes: inside a quoted string everything but
/// the closing quote is accumulated verbatim; outside one, the buffer is
/// flushed at whitespace or at the first character of a symbol that would
/// not extend the current buffer into a longer recognized symbol — except
/// that a buffer of exactly `end` is never split on `-`, which is what lets
/// `end-if`, `end-while`, and `end-def` survive as single lexemes.
pub fn tokenize(source: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut buffer = String::new();
    let mut in_string = false;

    for c in source.chars() {
        if in_string && c != QUOTE {
            buffer.push(c);
            continue;
        }

        if c == QUOTE {
            if in_string {
                in_string = false;
                buffer.push(c);
                tokens.push(make_token(std::mem::take(&mut buffer))?);
                continue;
            } else {
                in_string = true;
                // Fall through: the opening quote itself is accumulated
                // below like any other character.
            }
        }

        if is_symbol(&buffer) {
            let mut extended = buffer.clone();
            extended.push(c);
            if !is_symbol(&extended) {
                tokens.push(make_token(std::mem::take(&mut buffer))?);
                push_stripped(&mut buffer, c);
                continue;
            }
        }

        if !buffer.is_empty() {
            let mut extended = buffer.clone();
            extended.push(c);
            let would_split = c.is_whitespace()
                || (symbol_start_chars().contains(&c) && !is_symbol(&extended) && buffer != "end");
            if would_split {
                tokens.push(make_token(std::mem::take(&mut buffer))?);
            }
        }

        push_stripped(&mut buffer, c);
    }

    if !buffer.is_empty() {
        tokens.push(make_token(buffer)?);
    }

    tokens.push(Token::eof());
    Ok(tokens)
}

fn push_stripped(buffer: &mut String, c: char) {
    if !c.is_whitespace() {
        buffer.push(c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).unwrap().into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn tokenizes_keywords_symbols_and_literals() {
        let source = r#"
            if then else end-if while do end-while = 100 some_string
            ("a string") [false, true ] def return end-def or and not
            > < >= <= == != + - * / %"#;
        let expected = vec![
            TokenKind::If,
            TokenKind::Then,
            TokenKind::Else,
            TokenKind::EndIf,
            TokenKind::While,
            TokenKind::Do,
            TokenKind::EndWhile,
            TokenKind::Assignment,
            TokenKind::Integer,
            TokenKind::Identifier,
            TokenKind::OpenParen,
            TokenKind::String,
            TokenKind::CloseParen,
            TokenKind::OpenBracket,
            TokenKind::Boolean,
            TokenKind::Comma,
            TokenKind::Boolean,
            TokenKind::CloseBracket,
            TokenKind::Def,
            TokenKind::Return,
            TokenKind::EndDef,
            TokenKind::Or,
            TokenKind::And,
            TokenKind::Not,
            TokenKind::Gt,
            TokenKind::Lt,
            TokenKind::Gteq,
            TokenKind::Lteq,
            TokenKind::Eq,
            TokenKind::NotEq,
            TokenKind::Add,
            TokenKind::Sub,
            TokenKind::Mul,
            TokenKind::Div,
            TokenKind::Mod,
            TokenKind::Eof,
        ];
        assert_eq!(kinds(source), expected);
    }

    #[test]
    fn string_literal_keeps_quotes_in_lexeme() {
        let tokens = tokenize(r#""hello world""#).unwrap();
        assert_eq!(tokens[0].kind, TokenKind::String);
        assert_eq!(tokens[0].lexeme, "\"hello world\"");
    }

    #[test]
    fn end_hyphen_is_not_split_as_subtraction() {
        let tokens = tokenize("end-while").unwrap();
        assert_eq!(tokens[0].kind, TokenKind::EndWhile);
    }

    #[test]
    fn hyphen_after_non_end_buffer_does_split() {
        // `a-b` is identifier `a`, `sub`, identifier `b` — only `end` is guarded.
        let tokens = tokenize("a-b").unwrap();
        let kinds: Vec<_> = tokens.into_iter().map(|t| t.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TokenKind::Identifier,
                TokenKind::Sub,
                TokenKind::Identifier,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn unterminated_string_is_invalid_token() {
        let err = tokenize(r#"print("oops)"#).unwrap_err();
        assert!(matches!(err, ErioError::LexerError(_)));
    }

    #[test]
    fn unknown_character_is_invalid_token() {
        let err = tokenize("@").unwrap_err();
        assert!(matches!(err, ErioError::LexerError(_)));
    }

    #[test]
    fn whitespace_insensitive_equivalent_programs_tokenize_identically() {
        let a = tokenize("x=1+1").unwrap();
        let b = tokenize("x = 1 + 1").unwrap();
        let ak: Vec<_> = a.into_iter().map(|t| (t.kind, t.lexeme)).collect();
        let bk: Vec<_> = b.into_iter().map(|t| (t.kind, t.lexeme)).collect();
        assert_eq!(ak, bk);
    }
}
