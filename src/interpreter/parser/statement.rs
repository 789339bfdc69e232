use crate::{
    ast::{ElseClause, Expr, Header, SourceLine, Statement},
    error::RuntimeError,
    interpreter::parser::{
        core::parse_source,
        utils::{
            find_assignment, find_open_brace, is_bindable_name, is_identifier, parenthesized,
            strip_keyword,
        },
    },
};

/// Classifies a single source line.
///
/// The forms are tried in priority order:
/// - `stop()`
/// - `wait.<unit>(<integer>)`
/// - `<identifier> = <expression>` (not on a line starting with `if`, and
///   not inside an inline block such as `rep 3 { x = x + 1 }`)
/// - `out(<expression>)`
/// - `in("<prompt>")`
/// - `rep <count> {`
/// - `if (<expression>) {`
/// - `else ...` without a preceding `if`
/// - `defy(<name>) {`
/// - `<name>()`
///
/// Empty lines are [`Statement::Blank`]. A line that matches none of the
/// forms is [`Statement::Unrecognized`]. Classification never fails: a line
/// that has the shape of a statement but cannot be parsed becomes
/// [`Statement::Invalid`], or carries the error in its [`Header`] when it
/// opens a block that must still be skipped.
///
/// # Parameters
/// - `source`: The trimmed line and its line number.
///
/// # Returns
/// The classified [`Statement`].
///
/// # Example
/// ```
/// use relief::{
///     ast::{SourceLine, Statement},
///     interpreter::parser::statement::parse_statement,
/// };
///
/// let stop = parse_statement(&SourceLine::new("stop()", 7));
/// assert_eq!(stop, Statement::Stop { line: 7 });
///
/// let call = parse_statement(&SourceLine::new("greet()", 2));
/// assert_eq!(call,
///            Statement::FunctionCall { name: "greet".to_string(),
///                                      line: 2, });
///
/// let noise = parse_statement(&SourceLine::new("hello there", 3));
/// assert_eq!(noise, Statement::Unrecognized { line: 3 });
/// ```
#[must_use]
pub fn parse_statement(source: &SourceLine) -> Statement {
    let text = source.text.as_str();
    let line = source.line;

    if text.is_empty() {
        return Statement::Blank;
    }

    if let Some(rest) = strip_keyword(text, "stop")
       && rest.trim_start().starts_with("()")
    {
        return Statement::Stop { line };
    }

    if let Some(rest) = text.strip_prefix("wait.") {
        return parse_wait(rest, line);
    }

    if strip_keyword(text, "if").is_none()
       && let Some(equals) = find_assignment(text)
       && find_open_brace(text).is_none_or(|brace| brace > equals)
    {
        return parse_assignment(&text[..equals], &text[equals + 1..], line);
    }

    if let Some(rest) = strip_keyword(text, "out")
       && let Some(inner) = parenthesized(rest)
    {
        return match parse_source(inner, line) {
            Ok(expr) => Statement::Output { expr, line },
            Err(error) => Statement::Invalid(error.into()),
        };
    }

    if let Some(rest) = strip_keyword(text, "out")
       && rest.trim_start().starts_with('(')
    {
        return Statement::Invalid(invalid_syntax("out", "expected ')' at the end of the line", line));
    }

    if let Some(rest) = strip_keyword(text, "in")
       && rest.trim_start().starts_with('(')
    {
        return match parse_source(text, line) {
            Ok(Expr::Input { prompt, line }) => Statement::Input { prompt, line },
            Ok(_) => Statement::Unrecognized { line },
            Err(error) => Statement::Invalid(error.into()),
        };
    }

    if let Some(rest) = strip_keyword(text, "rep") {
        return parse_repeat(rest, text, line);
    }

    if let Some(rest) = strip_keyword(text, "if") {
        return parse_conditional(rest, text, line);
    }

    if strip_keyword(text, "else").is_some() {
        return Statement::Else { brace: find_open_brace(text),
                                 line };
    }

    if let Some(rest) = strip_keyword(text, "defy") {
        return parse_function_definition(rest, text, line);
    }

    if let Some(name) = text.strip_suffix("()").map(str::trim_end)
       && is_identifier(name)
    {
        return Statement::FunctionCall { name: name.to_string(),
                                         line };
    }

    Statement::Unrecognized { line }
}

/// Parses the clause that follows an `if` branch's closing brace.
///
/// `text` must start with the `else` keyword. The clause is either
/// `else if (<expression>) {` or `else {`; the returned brace offset is
/// relative to `text`.
///
/// # Errors
/// Returns `InvalidSyntax` if the clause has no opening brace, if anything
/// other than `if (...)` sits between `else` and the brace, or if the
/// `else if` condition does not parse.
///
/// # Example
/// ```
/// use relief::interpreter::parser::statement::parse_else_clause;
///
/// let clause = parse_else_clause("else if (x > 1) {", 4).unwrap();
/// assert!(clause.condition.is_some());
/// assert_eq!(clause.brace, 16);
///
/// let clause = parse_else_clause("else {", 4).unwrap();
/// assert!(clause.condition.is_none());
///
/// assert!(parse_else_clause("else out(1)", 4).is_err());
/// ```
pub fn parse_else_clause(text: &str, line: usize) -> Header<ElseClause> {
    let Some(rest) = strip_keyword(text, "else") else {
        return Err(invalid_syntax("else", "expected 'else'", line));
    };
    let Some(brace) = find_open_brace(text) else {
        return Err(invalid_syntax("else", "expected '{'", line));
    };

    let head = text[text.len() - rest.len()..brace].trim();
    if head.is_empty() {
        return Ok(ElseClause { condition: None,
                               brace });
    }

    match strip_keyword(head, "if") {
        Some(condition) => Ok(ElseClause { condition: Some(parse_condition(condition, "else if", line)?),
                                           brace }),
        None => Err(invalid_syntax("else", "expected '{' or 'if' after 'else'", line)),
    }
}

/// Parses `<unit>(<integer>)`, the part of a wait statement after `wait.`.
fn parse_wait(rest: &str, line: usize) -> Statement {
    let Some(open) = rest.find('(') else {
        return Statement::Invalid(invalid_syntax("wait", "expected 'wait.<unit>(<integer>)'", line));
    };

    let unit = rest[..open].trim();
    let Some(amount) = parenthesized(&rest[open..]) else {
        return Statement::Invalid(invalid_syntax("wait", "expected ')' after the amount", line));
    };

    if !is_identifier(unit) {
        return Statement::Invalid(invalid_syntax("wait", "expected a unit name after 'wait.'", line));
    }

    if amount.is_empty() || !amount.chars().all(|c| c.is_ascii_digit()) {
        return Statement::Invalid(invalid_syntax("wait",
                                                 "the amount must be a non-negative integer",
                                                 line));
    }

    // All digits, so the parse can only fail on overflow.
    amount.parse()
          .map_or_else(|_| Statement::Invalid(invalid_syntax("wait", "the amount is too large", line)),
                       |amount| Statement::Wait { unit: unit.to_string(),
                                                  amount,
                                                  line })
}

fn parse_assignment(target: &str, value: &str, line: usize) -> Statement {
    let name = target.trim();
    if !is_bindable_name(name) {
        return Statement::Invalid(RuntimeError::InvalidVariableName { name: name.to_string(),
                                                                      line });
    }

    match parse_source(value, line) {
        Ok(value) => Statement::Assignment { name: name.to_string(),
                                             value,
                                             line },
        Err(error) => Statement::Invalid(error.into()),
    }
}

/// `rest` is the text after the `rep` keyword.
fn parse_repeat(rest: &str, text: &str, line: usize) -> Statement {
    let Some(brace) = find_open_brace(text) else {
        return Statement::Invalid(invalid_syntax("rep", "expected '{' after the count", line));
    };

    let count_text = text[text.len() - rest.len()..brace].trim();
    let count = if count_text.is_empty() {
        Err(invalid_syntax("rep", "missing repetition count", line))
    } else {
        parse_source(count_text, line).map_err(|error| {
                                          tracing::debug!(%error, "rep count does not parse");
                                          invalid_syntax("rep", "the count is not a valid expression", line)
                                      })
    };

    Statement::Repeat { count,
                        brace,
                        line }
}

/// `rest` is the text after the `if` keyword.
fn parse_conditional(rest: &str, text: &str, line: usize) -> Statement {
    let Some(brace) = find_open_brace(text) else {
        return Statement::Invalid(invalid_syntax("if", "expected '{' after the condition", line));
    };

    let head = &text[text.len() - rest.len()..brace];

    Statement::Conditional { condition: parse_condition(head, "if", line),
                             brace,
                             line }
}

/// `rest` is the text after the `defy` keyword.
fn parse_function_definition(rest: &str, text: &str, line: usize) -> Statement {
    let Some(brace) = find_open_brace(text) else {
        return Statement::Invalid(invalid_syntax("defy", "expected '{' after the name", line));
    };

    let head = &text[text.len() - rest.len()..brace];
    let name = match parenthesized(head).map(str::trim) {
        Some(name) if is_bindable_name(name) => Ok(name.to_string()),
        Some(name) => Err(invalid_syntax("defy", &format!("'{name}' is not a valid name"), line)),
        None => Err(invalid_syntax("defy", "expected 'defy(<name>) {'", line)),
    };

    Statement::FunctionDefinition { name,
                                    brace,
                                    line }
}

/// Parses a parenthesized condition such as `(x > 1)`.
fn parse_condition(head: &str, statement: &str, line: usize) -> Header<Expr> {
    let Some(inner) = parenthesized(head) else {
        return Err(invalid_syntax(statement, "the condition must be in parentheses", line));
    };

    parse_source(inner, line).map_err(|error| {
                                 tracing::debug!(%error, "condition does not parse");
                                 invalid_syntax(statement, "the condition is not a valid expression", line)
                             })
}

fn invalid_syntax(statement: &str, details: &str, line: usize) -> RuntimeError {
    RuntimeError::InvalidSyntax { statement: statement.to_string(),
                                  details: details.to_string(),
                                  line }
}
