use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr, LiteralValue, UnaryOperator},
    error::ParseError,
    interpreter::{
        lexer::Token,
        parser::{
            binary::parse_comparison,
            core::{ParseResult, parse_expression},
        },
    },
};

/// Parses a logical NOT expression.
///
/// `not` binds more loosely than comparisons, so `not a == b` is parsed as
/// `not (a == b)`.
///
/// Grammar:
/// ```text
///     not := "not" not
///          | comparison
/// ```
pub(crate) fn parse_not<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    if let Some((Token::Not, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let expr = parse_not(tokens)?;
        Ok(Expr::UnaryOp { op: UnaryOperator::Not,
                           expr: Box::new(expr),
                           line })
    } else {
        parse_comparison(tokens)
    }
}

/// Parses a prefix sign.
///
/// Supports prefix operators:
/// - `-`  (numeric negation)
/// - `+`  (numeric identity)
///
/// Signs bind more loosely than `**`, so `-2 ** 2` is `-(2 ** 2)`.
///
/// Grammar:
/// ```text
///     unary := ("-" | "+") unary
///            | power
/// ```
pub(crate) fn parse_unary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let op = match tokens.peek() {
        Some((Token::Minus, line)) => Some((UnaryOperator::Negate, *line)),
        Some((Token::Plus, line)) => Some((UnaryOperator::Plus, *line)),
        _ => None,
    };

    if let Some((op, line)) = op {
        tokens.next();
        let expr = parse_unary(tokens)?;
        Ok(Expr::UnaryOp { op,
                           expr: Box::new(expr),
                           line })
    } else {
        parse_power(tokens)
    }
}

/// Parses exponentiation expressions.
///
/// Exponentiation is right-associative: `a ** b ** c` parses as
/// `a ** (b ** c)`. The exponent may carry its own sign, as in `2 ** -1`.
///
/// Grammar: `power := primary ("**" unary)?`
pub(crate) fn parse_power<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let base = parse_primary(tokens)?;

    if let Some((Token::DoubleStar, line)) = tokens.peek() {
        let line = *line;
        tokens.next();
        let exponent = parse_unary(tokens)?;
        return Ok(Expr::BinaryOp { left: Box::new(base),
                                   op: BinaryOperator::Pow,
                                   right: Box::new(exponent),
                                   line });
    }

    Ok(base)
}

/// Parses a primary (atomic) expression.
///
/// Primary expressions form the base of the expression grammar and include:
/// - numeric, string and boolean literals
/// - identifiers
/// - parenthesized expressions
/// - the input form `in("prompt")`
///
/// Grammar (simplified):
/// ```text
///     primary := literal
///              | identifier
///              | "(" expression ")"
///              | "in" "(" string ")"
/// ```
/// # Parameters
/// - `tokens`: Token iterator positioned at the start of a primary expression.
///
/// # Returns
/// The parsed primary [`Expr`] or a `ParseError` on failure.
pub(crate) fn parse_primary<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let Some((token, line)) = tokens.next() else {
        return Err(ParseError::UnexpectedEndOfInput { line: 0 });
    };
    let line = *line;

    match token {
        Token::Integer(value) => Ok(literal((*value).into(), line)),
        Token::Real(value) => Ok(literal((*value).into(), line)),
        Token::Bool(value) => Ok(literal((*value).into(), line)),
        Token::Str(value) => Ok(literal(value.as_str().into(), line)),
        Token::Identifier(name) => Ok(Expr::Variable { name: name.clone(),
                                                       line }),
        Token::LParen => {
            let expr = parse_expression(tokens)?;
            expect_closing_paren(tokens, line)?;
            Ok(expr)
        },
        Token::In => parse_input(tokens, line),
        tok => Err(ParseError::UnexpectedToken { token: format!("{tok:?}"),
                                                 line }),
    }
}

/// Parses the remainder of `in("prompt")` after the `in` keyword.
///
/// The prompt must be a single string literal.
fn parse_input<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::LParen, _)) => {},
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected '(' after 'in', found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    }

    let prompt = match tokens.next() {
        Some((Token::Str(prompt), _)) => prompt.clone(),
        Some((tok, line)) => {
            return Err(ParseError::UnexpectedToken { token: format!("Expected a prompt string, found {tok:?}"),
                                                     line:  *line, });
        },
        None => return Err(ParseError::UnexpectedEndOfInput { line }),
    };

    expect_closing_paren(tokens, line)?;

    Ok(Expr::Input { prompt, line })
}

/// Consumes a `)` or reports `ExpectedClosingParen`.
fn expect_closing_paren<'a, I>(tokens: &mut Peekable<I>, line: usize) -> ParseResult<()>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    match tokens.next() {
        Some((Token::RParen, _)) => Ok(()),
        _ => Err(ParseError::ExpectedClosingParen { line }),
    }
}

fn literal(value: LiteralValue, line: usize) -> Expr {
    Expr::Literal { value, line }
}
