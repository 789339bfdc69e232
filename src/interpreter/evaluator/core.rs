use std::{
    io::{BufRead, Write},
    ops::ControlFlow,
    time::Duration,
};

use crate::{
    ast::{BinaryOperator, Expr},
    config::Config,
    error::RuntimeError,
    interpreter::{
        parser::core::parse_source,
        value::{core::Value, environment::Environment},
    },
};

/// Result type used by the evaluator.
///
/// All evaluation functions return either a value of type `T` or a
/// `RuntimeError` describing the failure.
pub type EvalResult<T> = Result<T, RuntimeError>;

/// The name the `in("...")` statement binds the line it reads to.
pub const LAST_INPUT: &str = "_last_input";

/// How deeply callable blocks may invoke each other.
pub const MAX_CALL_DEPTH: usize = 128;

/// The signal raised by `stop()`.
///
/// It is not an error: it unwinds every active block, loop iteration and
/// call back to [`crate::run_program`], which reports a normal
/// early termination.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Stop {
    /// The line of the `stop()` statement.
    pub line: usize,
}

/// Execution either continues with a value or unwinds with a [`Stop`].
///
/// Every statement-level routine returns this, so `?` re-propagates the stop
/// signal at each call site before the next statement runs.
pub type Flow<T = ()> = ControlFlow<Stop, T>;

/// Stores the runtime state of one program run.
///
/// The interpreter owns the [`Environment`] and borrows the three console
/// streams. Programs print to `output`, `in(...)` reads from `input`, and
/// non-fatal statement errors are written to `diagnostics`, one per line.
///
/// ## Usage
/// ```
/// use std::io::Cursor;
///
/// use relief::{config::Config, interpreter::evaluator::core::Interpreter};
///
/// let mut output = Vec::new();
/// let mut input = Cursor::new("");
/// let mut diagnostics = Vec::new();
///
/// let mut interpreter =
///     Interpreter::new(Config::default(), &mut output, &mut input, &mut diagnostics);
/// let value = interpreter.evaluate("2 ** 10", 1).unwrap();
///
/// assert_eq!(value.to_string(), "1024");
/// ```
pub struct Interpreter<'io> {
    /// The single namespace shared by every block of the run.
    pub environment:     Environment,
    /// Settings for this run.
    pub config:          Config,
    pub(crate) output:   &'io mut dyn Write,
    input:               &'io mut dyn BufRead,
    diagnostics:         &'io mut dyn Write,
    pub(crate) sleeper:  fn(Duration),
    pub(crate) depth:    usize,
}

impl<'io> Interpreter<'io> {
    /// Creates an interpreter with an empty environment.
    ///
    /// `wait` statements sleep the current thread; see
    /// [`Interpreter::with_sleeper`] to replace that.
    #[must_use]
    pub fn new(config: Config,
               output: &'io mut dyn Write,
               input: &'io mut dyn BufRead,
               diagnostics: &'io mut dyn Write)
               -> Self {
        Self { environment: Environment::new(),
               config,
               output,
               input,
               diagnostics,
               sleeper: std::thread::sleep,
               depth: 0 }
    }

    /// Replaces the routine `wait` statements use to suspend execution.
    #[must_use]
    pub fn with_sleeper(mut self, sleeper: fn(Duration)) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Evaluates an expression and returns the resulting value.
    ///
    /// `and` and `or` short-circuit and yield the operand that decided the
    /// result. Comparison chains stop at the first comparison that fails.
    ///
    /// # Parameters
    /// - `expr`: Expression to evaluate.
    ///
    /// # Returns
    /// The computed [`Value`].
    ///
    /// # Errors
    /// Fails on unbound names, type mismatches, division by zero and closed
    /// input.
    pub fn eval(&mut self, expr: &Expr) -> EvalResult<Value> {
        match expr {
            Expr::Literal { value, .. } => Ok(Value::from(value.clone())),
            Expr::Variable { name, line } => {
                self.environment
                    .get(name)
                    .cloned()
                    .ok_or_else(|| RuntimeError::UndefinedVariable { name: name.clone(),
                                                                     line: *line, })
            },
            Expr::UnaryOp { op, expr, line } => {
                let value = self.eval(expr)?;
                Self::eval_unary(*op, &value, *line)
            },
            Expr::BinaryOp { left,
                             op: BinaryOperator::And,
                             right,
                             .. } => {
                let left = self.eval(left)?;
                if left.is_truthy() { self.eval(right) } else { Ok(left) }
            },
            Expr::BinaryOp { left,
                             op: BinaryOperator::Or,
                             right,
                             .. } => {
                let left = self.eval(left)?;
                if left.is_truthy() { Ok(left) } else { self.eval(right) }
            },
            Expr::BinaryOp { left,
                             op,
                             right,
                             line, } => {
                let left = self.eval(left)?;
                let right = self.eval(right)?;
                Self::eval_binary(*op, &left, &right, *line)
            },
            Expr::ComparisonChain { operands,
                                    operators,
                                    line, } => self.eval_comparison_chain(operands, operators, *line),
            Expr::Input { prompt, line } => self.read_input(prompt, *line).map(Value::from),
        }
    }

    /// Parses and evaluates the expression text of one source line.
    ///
    /// # Errors
    /// Returns the parse error wrapped in [`RuntimeError::Parse`], or any
    /// evaluation error.
    pub fn evaluate(&mut self, text: &str, line: usize) -> EvalResult<Value> {
        let expr = parse_source(text, line)?;
        self.eval(&expr)
    }

    fn eval_comparison_chain(&mut self,
                             operands: &[Expr],
                             operators: &[BinaryOperator],
                             line: usize)
                             -> EvalResult<Value> {
        let Some((first, rest)) = operands.split_first() else {
            return Ok(Value::Boolean(true));
        };

        let mut left = self.eval(first)?;
        for (op, operand) in operators.iter().zip(rest) {
            let right = self.eval(operand)?;
            if !Self::eval_comparison(*op, &left, &right, line)? {
                return Ok(Value::Boolean(false));
            }
            left = right;
        }

        Ok(Value::Boolean(true))
    }

    /// Writes `prompt` and a space, then reads one line of input without its
    /// line ending.
    pub(crate) fn read_input(&mut self, prompt: &str, line: usize) -> EvalResult<String> {
        let io_error = |error: std::io::Error| RuntimeError::Io { details: error.to_string(),
                                                                  line };

        write!(self.output, "{prompt} ").map_err(io_error)?;
        self.output.flush().map_err(io_error)?;

        let mut buffer = String::new();
        if self.input.read_line(&mut buffer).map_err(io_error)? == 0 {
            return Err(RuntimeError::InputClosed { line });
        }

        let trimmed = buffer.trim_end_matches(['\n', '\r']).len();
        buffer.truncate(trimmed);
        tracing::trace!(line, "read a line of input");

        Ok(buffer)
    }

    /// Reports a non-fatal statement error and lets execution continue.
    pub(crate) fn report(&mut self, error: &RuntimeError) {
        tracing::warn!(line = error.line_number(), %error, "statement failed");

        if let Err(io) = writeln!(self.diagnostics, "{error}") {
            tracing::error!(%io, "could not write diagnostic");
        }
    }
}
