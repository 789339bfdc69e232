use std::iter::Peekable;

use crate::{
    ast::{BinaryOperator, Expr},
    interpreter::{
        lexer::Token,
        parser::{
            core::ParseResult,
            unary::{parse_not, parse_unary},
        },
    },
};

/// Parses logical OR expressions.
///
/// The rule is: `logical_or := logical_and ("or" logical_and)*`
///
/// # Parameters
/// - `tokens`: Token stream with line information.
///
/// # Returns
/// An `Expr::BinaryOp` tree, or the lower-level expression if no `or` is
/// present.
pub fn parse_logical_or<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, parse_logical_and, |token| match token {
        Token::Or => Some(BinaryOperator::Or),
        _ => None,
    })
}

/// Parses logical AND expressions.
///
/// The rule is: `logical_and := not ("and" not)*`
pub fn parse_logical_and<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, parse_not, |token| match token {
        Token::And => Some(BinaryOperator::And),
        _ => None,
    })
}

/// Parses relational and equality operators.
///
/// This parser handles all comparison operators:
/// `<`, `>`, `<=`, `>=`, `==`, `!=`.
///
/// A single comparison produces an `Expr::BinaryOp`. Two or more chained
/// comparisons such as `a < b <= c` produce an `Expr::ComparisonChain`, which
/// holds only when every adjacent pair holds.
///
/// The rule is: `comparison := additive (compare_op additive)*`
pub fn parse_comparison<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let first = parse_additive(tokens)?;
    let mut operands = vec![first];
    let mut operators = Vec::new();
    let mut chain_line = 0;

    while let Some((token, line)) = tokens.peek()
          && let Some(op) = token_to_binary_operator(token)
          && op.is_comparison()
    {
        if operators.is_empty() {
            chain_line = *line;
        }
        tokens.next();
        operators.push(op);
        operands.push(parse_additive(tokens)?);
    }

    match operators.len() {
        0 => Ok(operands.remove(0)),
        1 => {
            let right = operands.pop().map(Box::new);
            let left = operands.pop().map(Box::new);
            match (left, right) {
                (Some(left), Some(right)) => Ok(Expr::BinaryOp { left,
                                                                 op: operators[0],
                                                                 right,
                                                                 line: chain_line }),
                _ => unreachable!("a single comparison always has two operands"),
            }
        },
        _ => Ok(Expr::ComparisonChain { operands,
                                        operators,
                                        line: chain_line }),
    }
}

/// Parses addition and subtraction expressions.
///
/// Handles left-associative binary operators: `+` and `-`.
///
/// The rule is: `additive := multiplicative (("+" | "-") multiplicative)*`
pub fn parse_additive<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, parse_multiplicative, |token| {
        token_to_binary_operator(token).filter(|op| {
                                           matches!(op, BinaryOperator::Add | BinaryOperator::Sub)
                                       })
    })
}

/// Parses multiplication-level expressions.
///
/// Handles left-associative operators: `*`, `/`, `//` and `%`.
///
/// The rule is: `multiplicative := unary (("*" | "/" | "//" | "%") unary)*`
pub fn parse_multiplicative<'a, I>(tokens: &mut Peekable<I>) -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    parse_left_associative(tokens, parse_unary, |token| {
        token_to_binary_operator(token).filter(|op| {
                                           matches!(op,
                                                    BinaryOperator::Mul
                                                    | BinaryOperator::Div
                                                    | BinaryOperator::FloorDiv
                                                    | BinaryOperator::Mod)
                                       })
    })
}

/// Parses one left-associative precedence level.
///
/// Operands are parsed with `operand`; the loop keeps folding as long as the
/// next token maps to an operator through `operator`.
fn parse_left_associative<'a, I>(tokens: &mut Peekable<I>,
                                 operand: fn(&mut Peekable<I>) -> ParseResult<Expr>,
                                 operator: impl Fn(&Token) -> Option<BinaryOperator>)
                                 -> ParseResult<Expr>
    where I: Iterator<Item = &'a (Token, usize)> + Clone
{
    let mut left = operand(tokens)?;

    while let Some((token, line)) = tokens.peek()
          && let Some(op) = operator(token)
    {
        let line = *line;
        tokens.next();
        let right = operand(tokens)?;
        left = Expr::BinaryOp { left: Box::new(left),
                                op,
                                right: Box::new(right),
                                line };
    }

    Ok(left)
}

/// Maps a token to its binary operator, if it is one.
///
/// # Example
/// ```
/// use relief::{
///     ast::BinaryOperator,
///     interpreter::{lexer::Token, parser::binary::token_to_binary_operator},
/// };
///
/// assert_eq!(token_to_binary_operator(&Token::DoubleStar), Some(BinaryOperator::Pow));
/// assert_eq!(token_to_binary_operator(&Token::LParen), None);
/// ```
#[must_use]
pub const fn token_to_binary_operator(token: &Token) -> Option<BinaryOperator> {
    match token {
        Token::Plus => Some(BinaryOperator::Add),
        Token::Minus => Some(BinaryOperator::Sub),
        Token::Star => Some(BinaryOperator::Mul),
        Token::Slash => Some(BinaryOperator::Div),
        Token::DoubleSlash => Some(BinaryOperator::FloorDiv),
        Token::Percent => Some(BinaryOperator::Mod),
        Token::DoubleStar => Some(BinaryOperator::Pow),
        Token::EqualEqual => Some(BinaryOperator::Equal),
        Token::BangEqual => Some(BinaryOperator::NotEqual),
        Token::Less => Some(BinaryOperator::Less),
        Token::LessEqual => Some(BinaryOperator::LessEqual),
        Token::Greater => Some(BinaryOperator::Greater),
        Token::GreaterEqual => Some(BinaryOperator::GreaterEqual),
        Token::And => Some(BinaryOperator::And),
        Token::Or => Some(BinaryOperator::Or),
        _ => None,
    }
}
