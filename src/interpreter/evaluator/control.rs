use std::{ops::ControlFlow, rc::Rc};

use crate::{
    ast::{Block, Expr, Header, SourceLine},
    error::RuntimeError,
    interpreter::{
        evaluator::{
            core::{Flow, Interpreter, MAX_CALL_DEPTH},
            statement::Step,
        },
        parser::{
            block::{Capture, capture_block},
            statement::parse_else_clause,
            utils::{find_open_brace, strip_keyword},
        },
        value::core::{CallableBlock, Value},
    },
};

/// What decides whether a branch of an `if` chain runs.
enum Guard {
    /// `if (...)` or `else if (...)`.
    When(Expr),
    /// A plain `else`.
    Otherwise,
    /// A clause whose header could not be parsed. Reaching it ends the chain.
    Malformed(RuntimeError),
}

struct Branch {
    guard: Guard,
    body:  Block,
}

impl Interpreter<'_> {
    /// Executes `rep <count> { ... }`.
    ///
    /// The block is captured once and run `count` times against the shared
    /// environment. A count that is malformed or does not evaluate to a
    /// non-negative integer is reported, and the block is skipped.
    pub(crate) fn execute_repeat(&mut self,
                                 count: Header<Expr>,
                                 source: &SourceLine,
                                 brace: usize,
                                 rest: &[SourceLine])
                                 -> Flow<Step> {
        let Capture { body,
                      consumed,
                      trailing, } = capture_block(source, brace, rest, self.config.block_matching);
        let line = source.line;

        match count.and_then(|expr| self.eval(&expr))
                   .and_then(|value| value.as_count(line))
        {
            Ok(times) => {
                tracing::debug!(line, times, lines = body.len(), "repeating block");
                for _ in 0..times {
                    self.execute_block(&body)?;
                }
            },
            Err(error) => self.report(&error),
        }

        ControlFlow::Continue(Step { consumed, trailing })
    }

    /// Executes an `if` chain.
    ///
    /// Every clause of the chain is captured first: `else if` and `else`
    /// clauses are picked up from the text after a branch's closing brace or
    /// from the next non-blank line. The guards are then tried in order and
    /// only the first branch whose guard holds runs.
    ///
    /// A guard that is malformed or fails to evaluate is reported and ends the
    /// chain without running any branch.
    pub(crate) fn execute_conditional(&mut self,
                                      condition: Header<Expr>,
                                      source: &SourceLine,
                                      brace: usize,
                                      rest: &[SourceLine])
                                      -> Flow<Step> {
        let matching = self.config.block_matching;
        let first = capture_block(source, brace, rest, matching);

        let mut consumed = first.consumed;
        let mut trailing = first.trailing;
        let mut branches = vec![Branch { guard: guard_of(condition),
                                         body:  first.body, }];

        loop {
            let clause = match trailing.take() {
                Some(text) if strip_keyword(&text.text, "else").is_some() => text,
                Some(text) => {
                    trailing = Some(text);
                    break;
                },
                None => {
                    let blanks = rest[consumed..].iter().take_while(|next| next.is_blank()).count();
                    match rest.get(consumed + blanks) {
                        Some(next) if strip_keyword(&next.text, "else").is_some() => {
                            consumed += blanks + 1;
                            next.clone()
                        },
                        _ => break,
                    }
                },
            };

            let (guard, brace) = match parse_else_clause(&clause.text, clause.line) {
                Ok(parsed) => (parsed.condition.map_or(Guard::Otherwise, Guard::When), Some(parsed.brace)),
                Err(error) => (Guard::Malformed(error), find_open_brace(&clause.text)),
            };
            let closes_chain = !matches!(guard, Guard::When(_));

            let body = match brace {
                Some(brace) => {
                    let capture = capture_block(&clause, brace, &rest[consumed..], matching);
                    consumed += capture.consumed;
                    trailing = capture.trailing;
                    capture.body
                },
                None => Block::new(),
            };

            branches.push(Branch { guard, body });

            if closes_chain {
                break;
            }
        }

        tracing::debug!(line = source.line, branches = branches.len(), "conditional");

        for Branch { guard, body } in branches {
            match guard {
                Guard::When(condition) => match self.eval(&condition) {
                    Ok(value) if value.is_truthy() => {
                        self.execute_block(&body)?;
                        break;
                    },
                    Ok(_) => {},
                    Err(error) => {
                        self.report(&error);
                        break;
                    },
                },
                Guard::Otherwise => {
                    self.execute_block(&body)?;
                    break;
                },
                Guard::Malformed(error) => {
                    self.report(&error);
                    break;
                },
            }
        }

        ControlFlow::Continue(Step { consumed, trailing })
    }

    /// Reports an `else` that follows no `if` branch and skips its block.
    pub(crate) fn execute_orphan_else(&mut self,
                                      source: &SourceLine,
                                      brace: Option<usize>,
                                      line: usize,
                                      rest: &[SourceLine])
                                      -> Step {
        self.report(&RuntimeError::InvalidSyntax { statement: "else".to_string(),
                                                   details:   "'else' without a preceding 'if'".to_string(),
                                                   line });

        brace.map_or_else(Step::line_only, |brace| {
                 let capture = capture_block(source, brace, rest, self.config.block_matching);
                 Step { consumed: capture.consumed,
                        trailing: capture.trailing }
             })
    }

    /// Executes `defy(<name>) { ... }`: the block is captured without running
    /// and bound as a callable.
    pub(crate) fn execute_definition(&mut self,
                                     name: Header<String>,
                                     source: &SourceLine,
                                     brace: usize,
                                     rest: &[SourceLine])
                                     -> Step {
        let Capture { body,
                      consumed,
                      trailing, } = capture_block(source, brace, rest, self.config.block_matching);

        match name {
            Ok(name) => {
                tracing::debug!(line = source.line, name = %name, lines = body.len(), "defining block");
                let callable = CallableBlock::new(name.clone(), body);
                self.environment.bind(name, Value::from(callable));
            },
            Err(error) => self.report(&error),
        }

        Step { consumed, trailing }
    }

    /// Executes `<name>()`.
    ///
    /// The callable's lines run as a nested block against the same
    /// environment. Calling an unbound or non-callable name is reported.
    pub(crate) fn execute_call(&mut self, name: &str, line: usize) -> Flow {
        let body = match self.environment.get(name) {
            Some(Value::Callable(callable)) => Rc::clone(&callable.body),
            _ => {
                self.report(&RuntimeError::UndefinedFunction { name: name.to_string(),
                                                               line });
                return ControlFlow::Continue(());
            },
        };

        if self.depth >= MAX_CALL_DEPTH {
            self.report(&RuntimeError::RecursionLimit { name: name.to_string(),
                                                        line });
            return ControlFlow::Continue(());
        }

        tracing::debug!(line, name, depth = self.depth, "calling block");

        self.depth += 1;
        let flow = self.execute_block(&body);
        self.depth -= 1;

        flow
    }
}

fn guard_of(condition: Header<Expr>) -> Guard {
    match condition {
        Ok(expr) => Guard::When(expr),
        Err(error) => Guard::Malformed(error),
    }
}
