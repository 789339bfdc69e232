use logos::Logos;

use crate::error::ParseError;

/// Represents a lexical token in expression text.
/// A token is a minimal but meaningful unit of text produced by the lexer.
/// This enum defines all recognized tokens of the expression grammar.
#[derive(Logos, Debug, PartialEq, Clone)]
#[logos(extras = LexerExtras)]
pub enum Token {
    /// Numeric literal tokens, such as `3.14`, `.5`, `2.` or `2.1e-10`.
    #[regex(r"[0-9]+\.[0-9]*([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"\.[0-9]+([eE][+-]?[0-9]+)?", parse_float)]
    #[regex(r"[0-9]+[eE][+-]?[0-9]+", parse_float)]
    Real(f64),
    /// Integer literal tokens, such as `42`.
    #[regex(r"[0-9]+", parse_integer)]
    Integer(i64),
    /// String literal tokens delimited by matching double or single quotes.
    /// The contents are kept verbatim; there are no escape sequences.
    #[regex(r#""[^"]*""#, parse_string)]
    #[regex(r"'[^']*'", parse_string)]
    Str(String),
    /// Boolean literal tokens, such as `true` or `True`.
    #[token("true", parse_bool)]
    #[token("True", parse_bool)]
    #[token("false", parse_bool)]
    #[token("False", parse_bool)]
    Bool(bool),
    /// `and`
    #[token("and")]
    And,
    /// `or`
    #[token("or")]
    Or,
    /// `not`
    #[token("not")]
    Not,
    /// `in`, only meaningful as the head of `in("prompt")`.
    #[token("in")]
    In,
    /// Identifier tokens; variable names such as `x` or `total_count`.
    #[regex(r"[a-zA-Z_][a-zA-Z0-9_]*", |lex| lex.slice().to_string())]
    Identifier(String),
    /// `**`
    #[token("**")]
    DoubleStar,
    /// `*`
    #[token("*")]
    Star,
    /// `//`
    #[token("//")]
    DoubleSlash,
    /// `/`
    #[token("/")]
    Slash,
    /// `%`
    #[token("%")]
    Percent,
    /// `+`
    #[token("+")]
    Plus,
    /// `-`
    #[token("-")]
    Minus,
    /// `(`
    #[token("(")]
    LParen,
    /// `)`
    #[token(")")]
    RParen,
    /// `==`
    #[token("==")]
    EqualEqual,
    /// `!=`
    #[token("!=")]
    BangEqual,
    /// `<=`
    #[token("<=")]
    LessEqual,
    /// `>=`
    #[token(">=")]
    GreaterEqual,
    /// `<`
    #[token("<")]
    Less,
    /// `>`
    #[token(">")]
    Greater,
    /// Whitespace.
    #[regex(r"[ \t\f\r\n]+", logos::skip)]
    Ignored,
}

/// Additional information carried by the lexer during tokenization.
///
/// Expressions never span lines, so the line number is fixed for the whole
/// run and simply attached to every token for error reporting.
#[derive(Default)]
pub struct LexerExtras {
    /// The source line the expression text came from.
    pub line: usize,
}

/// Splits expression text into `(Token, line)` pairs.
///
/// # Errors
/// - `UnterminatedString` if a quote is opened but never closed.
/// - `LiteralTooLarge` if an integer literal does not fit into `i64`.
/// - `UnexpectedToken` for any other unrecognized input.
///
/// # Example
/// ```
/// use relief::interpreter::lexer::{Token, tokenize};
///
/// let tokens = tokenize("x + 1", 3).unwrap();
/// assert_eq!(tokens,
///            vec![(Token::Identifier("x".to_string()), 3),
///                 (Token::Plus, 3),
///                 (Token::Integer(1), 3)]);
/// ```
pub fn tokenize(text: &str, line: usize) -> Result<Vec<(Token, usize)>, ParseError> {
    let mut tokens = Vec::new();
    let mut lexer = Token::lexer_with_extras(text, LexerExtras { line });

    while let Some(token) = lexer.next() {
        if let Ok(tok) = token {
            tokens.push((tok, lexer.extras.line));
        } else {
            let slice = lexer.slice();
            return Err(classify_lex_error(slice, lexer.extras.line));
        }
    }

    Ok(tokens)
}

/// Picks the most helpful error for a slice the lexer could not match.
fn classify_lex_error(slice: &str, line: usize) -> ParseError {
    if slice.starts_with('"') || slice.starts_with('\'') {
        ParseError::UnterminatedString { line }
    } else if !slice.is_empty() && slice.chars().all(|c| c.is_ascii_digit()) {
        ParseError::LiteralTooLarge { line }
    } else {
        ParseError::UnexpectedToken { token: slice.to_string(),
                                      line }
    }
}

/// Parses a floating-point literal from the current token slice.
fn parse_float(lex: &logos::Lexer<Token>) -> Option<f64> {
    lex.slice().parse().ok()
}
/// Parses an integer literal from the current token slice.
///
/// Returns `None` when the literal does not fit into an `i64`, which the
/// lexer reports as an error.
fn parse_integer(lex: &logos::Lexer<Token>) -> Option<i64> {
    lex.slice().parse().ok()
}
/// Parses a boolean literal from the current token slice.
fn parse_bool(lex: &logos::Lexer<Token>) -> Option<bool> {
    match lex.slice() {
        "true" | "True" => Some(true),
        "false" | "False" => Some(false),
        _ => None,
    }
}
/// Strips the surrounding quotes from a string literal.
fn parse_string(lex: &logos::Lexer<Token>) -> String {
    let slice = lex.slice();
    slice[1..slice.len() - 1].to_string()
}
