use std::iter::Peekable;

use crate::{
    ast::Expr,
    error::ParseError,
    interpreter::{
        lexer::{Token, tokenize},
        parser::binary::parse_logical_or,
    },
};

pub type ParseResult<T> = Result<T, ParseError>;

/// Parses a full expression.
///
/// This is the entry point for expression parsing.
/// It begins at the lowest-precedence level, logical OR, and recursively
/// descends through the precedence hierarchy.
///
/// Grammar: `expression := logical_or`
///
/// # Parameters
/// - `tokens`: Token iterator providing `(Token, line)` pairs.
///
/// # Returns
/// The parsed expression node.
pub fn parse_expression<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_logical_or(tokens)
}

/// Tokenizes and parses the expression text of one source line.
///
/// The whole text must form exactly one expression; anything left over is
/// reported as trailing tokens.
///
/// # Errors
/// - `UnexpectedEndOfInput` if the text is empty or ends mid-expression.
/// - `UnexpectedTrailingTokens` if tokens remain after a complete expression.
/// - Any lexing error from [`tokenize`].
///
/// # Example
/// ```
/// use relief::{
///     ast::{BinaryOperator, Expr},
///     interpreter::parser::core::parse_source,
/// };
///
/// let expr = parse_source("1 + 2 * 3", 1).unwrap();
/// assert!(matches!(expr, Expr::BinaryOp { op: BinaryOperator::Add, .. }));
///
/// assert!(parse_source("1 +", 1).is_err());
/// assert!(parse_source("1 2", 1).is_err());
/// ```
pub fn parse_source(text: &str, line: usize) -> ParseResult<Expr> {
    let tokens = tokenize(text, line)?;
    let mut iter = tokens.iter().peekable();

    if iter.peek().is_none() {
        return Err(ParseError::UnexpectedEndOfInput { line });
    }

    // Running out of tokens mid-expression leaves the parser without a line.
    let expr = parse_expression(&mut iter).map_err(|error| match error {
                                              ParseError::UnexpectedEndOfInput { .. } => {
                                                  ParseError::UnexpectedEndOfInput { line }
                                              },
                                              other => other,
                                          })?;

    if let Some((token, line)) = iter.next() {
        return Err(ParseError::UnexpectedTrailingTokens { token: format!("{token:?}"),
                                                          line:  *line, });
    }

    Ok(expr)
}
