use std::{borrow::Cow, ops::ControlFlow};

use crate::{
    ast::{Expr, SourceLine, Statement, WaitUnit},
    error::RuntimeError,
    interpreter::{
        evaluator::core::{EvalResult, Flow, Interpreter, LAST_INPUT, Stop},
        parser::statement::parse_statement,
        value::core::Value,
    },
};

/// What a statement used up beyond its own line.
#[derive(Debug, Default)]
pub(crate) struct Step {
    /// Lines after the statement's own line that belonged to it.
    pub consumed: usize,
    /// Text after a closing brace, to be run as the next statement.
    pub trailing: Option<SourceLine>,
}

impl Step {
    pub(crate) const fn line_only() -> Self {
        Self { consumed: 0,
               trailing: None }
    }
}

impl Interpreter<'_> {
    /// Executes the lines of a block in order.
    ///
    /// Each line is classified and executed; statements that open a nested
    /// block consume the lines they capture. Errors are reported and
    /// execution continues with the next statement. A `stop()` anywhere,
    /// including inside nested blocks and called blocks, breaks out
    /// immediately.
    ///
    /// # Parameters
    /// - `block`: The lines to execute.
    ///
    /// # Returns
    /// `ControlFlow::Continue(())` after the last line, or
    /// `ControlFlow::Break(Stop)` when `stop()` ran.
    ///
    /// # Example
    /// ```
    /// use std::{io::Cursor, ops::ControlFlow};
    ///
    /// use relief::{ast::SourceLine, config::Config, interpreter::evaluator::core::Interpreter};
    ///
    /// let block = vec![SourceLine::new("x = 2 + 3", 1),
    ///                  SourceLine::new("out(x)", 2),
    ///                  SourceLine::new("stop()", 3),
    ///                  SourceLine::new("out(\"unreachable\")", 4)];
    ///
    /// let mut output = Vec::new();
    /// let mut input = Cursor::new("");
    /// let mut diagnostics = Vec::new();
    /// let mut interpreter =
    ///     Interpreter::new(Config::default(), &mut output, &mut input, &mut diagnostics);
    ///
    /// assert!(matches!(interpreter.execute_block(&block), ControlFlow::Break(_)));
    /// drop(interpreter);
    /// assert_eq!(String::from_utf8(output).unwrap(), "5\n");
    /// ```
    pub fn execute_block(&mut self, block: &[SourceLine]) -> Flow {
        let mut index = 0;
        let mut carried: Option<SourceLine> = None;

        loop {
            let source = match carried.take() {
                Some(line) => Cow::Owned(line),
                None => match block.get(index) {
                    Some(line) => {
                        index += 1;
                        Cow::Borrowed(line)
                    },
                    None => break,
                },
            };

            let step = self.execute_statement(&source, &block[index..])?;
            index += step.consumed;
            carried = step.trailing;
        }

        ControlFlow::Continue(())
    }

    /// Executes one classified line; `rest` holds the lines that follow it
    /// in the current block.
    fn execute_statement(&mut self, source: &SourceLine, rest: &[SourceLine]) -> Flow<Step> {
        let statement = parse_statement(source);
        tracing::trace!(line = source.line, text = %source.text, "dispatching");

        let result = match statement {
            Statement::Stop { line } => {
                tracing::debug!(line, "stop requested");
                return ControlFlow::Break(Stop { line });
            },
            Statement::Repeat { count, brace, .. } => {
                return self.execute_repeat(count, source, brace, rest);
            },
            Statement::Conditional { condition, brace, .. } => {
                return self.execute_conditional(condition, source, brace, rest);
            },
            Statement::Else { brace, line } => {
                return ControlFlow::Continue(self.execute_orphan_else(source, brace, line, rest));
            },
            Statement::FunctionDefinition { name, brace, .. } => {
                return ControlFlow::Continue(self.execute_definition(name, source, brace, rest));
            },
            Statement::FunctionCall { name, line } => {
                self.execute_call(&name, line)?;
                return ControlFlow::Continue(Step::line_only());
            },
            Statement::Wait { unit, amount, line } => self.execute_wait(&unit, amount, line),
            Statement::Assignment { name, value, line } => self.execute_assignment(name, &value, line),
            Statement::Output { expr, line } => self.execute_output(&expr, line),
            Statement::Input { prompt, line } => self.execute_input(&prompt, line),
            Statement::Invalid(error) => Err(error),
            Statement::Blank => Ok(()),
            Statement::Unrecognized { line } => {
                tracing::debug!(line, text = %source.text, "ignoring unrecognized line");
                Ok(())
            },
        };

        if let Err(error) = result {
            self.report(&error);
        }

        ControlFlow::Continue(Step::line_only())
    }

    fn execute_wait(&mut self, unit: &str, amount: u64, line: usize) -> EvalResult<()> {
        let unit = WaitUnit::from_name(unit).ok_or_else(|| {
                                                RuntimeError::UnknownWaitUnit { unit: unit.to_string(),
                                                                                line }
                                            })?;
        let duration = unit.duration(amount);

        tracing::debug!(line, ?duration, "waiting");
        (self.sleeper)(duration);

        Ok(())
    }

    /// The environment is only touched once the value is known.
    fn execute_assignment(&mut self, name: String, value: &Expr, line: usize) -> EvalResult<()> {
        let value = self.eval(value)?;
        tracing::trace!(line, name = %name, %value, "binding");
        self.environment.bind(name, value);

        Ok(())
    }

    fn execute_output(&mut self, expr: &Expr, line: usize) -> EvalResult<()> {
        let value = self.eval(expr)?;

        writeln!(self.output, "{value}").map_err(|error| RuntimeError::Io { details: error.to_string(),
                                                                            line })
    }

    fn execute_input(&mut self, prompt: &str, line: usize) -> EvalResult<()> {
        let text = self.read_input(prompt, line)?;
        self.environment.bind(LAST_INPUT, Value::from(text));

        Ok(())
    }
}
