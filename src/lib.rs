//! # relief
//!
//! relief is an interpreter for a small, line-oriented scripting language.
//! A program is a single `when project start { ... }` block of statements:
//! assignments, output and input, timed waits, `rep` loops, `if` chains and
//! named blocks defined with `defy` and invoked by name.

#![warn(
    clippy::redundant_clone,
    clippy::needless_pass_by_value,
    clippy::similar_names,
    clippy::large_enum_variant,
    clippy::string_lit_as_bytes,
    clippy::match_same_arms,
    clippy::cargo,
    clippy::nursery,
    clippy::perf,
    clippy::style,
    clippy::suspicious,
    clippy::correctness,
    clippy::complexity,
    clippy::pedantic,
    //missing_docs,
)]
#![allow(clippy::missing_errors_doc)]

use std::ops::ControlFlow;

use crate::{
    error::ParseError,
    interpreter::{evaluator::core::Interpreter, parser::block::extract_program},
};

/// Defines the structure of parsed code.
///
/// This module declares the `Expr` tree built for each expression, the
/// `Statement` a single line is classified as, and the `SourceLine` blocks
/// are made of.
///
/// # Responsibilities
/// - Defines expression and statement types for all language constructs.
/// - Attaches source line numbers to every node for error reporting.
pub mod ast;
/// Interpreter settings.
///
/// Holds `Config` and the `BlockMatching` mode that decides how nested blocks
/// are delimited.
pub mod config;
/// Provides unified error types for parsing and execution.
///
/// This module defines all errors that can be raised while lexing and parsing
/// expression text, locating the entry point, or executing statements. Every
/// error carries the source line it refers to.
///
/// # Responsibilities
/// - Defines error enums for all failure modes (parser, runtime).
/// - Supports integration with standard error handling traits.
pub mod error;
/// Orchestrates the execution of relief programs.
///
/// This module ties together lexing, parsing, block extraction, evaluation
/// and value representations to provide a complete runtime.
pub mod interpreter;
/// General utilities for numeric conversion and formatting.
pub mod util;

/// How a program run ended.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The last statement of the entry-point block was executed.
    Completed,
    /// `stop()` ended the run early.
    Stopped {
        /// The line of the `stop()` statement.
        line: usize,
    },
}

/// Runs a relief program.
///
/// The entry-point block is extracted from `source` and executed with
/// `interpreter`. Statement errors do not end the run; they are written to
/// the interpreter's diagnostic stream and execution continues.
///
/// # Errors
/// Returns [`ParseError::EntryPointNotFound`] if the program has no
/// `when project start { ... }` block. No statement is executed in that case.
///
/// # Examples
/// ```
/// use std::io::Cursor;
///
/// use relief::{Outcome, config::Config, interpreter::evaluator::core::Interpreter, run_program};
///
/// let mut output = Vec::new();
/// let mut input = Cursor::new("");
/// let mut diagnostics = Vec::new();
/// let mut interpreter =
///     Interpreter::new(Config::default(), &mut output, &mut input, &mut diagnostics);
///
/// let source = "when project start {\n    rep 3 { out(\"go\") }\n}";
/// assert_eq!(run_program(source, &mut interpreter), Ok(Outcome::Completed));
///
/// // No entry point: nothing runs.
/// assert!(run_program("out(1)", &mut interpreter).is_err());
///
/// drop(interpreter);
/// assert_eq!(String::from_utf8(output).unwrap(), "go\ngo\ngo\n");
/// ```
pub fn run_program(source: &str, interpreter: &mut Interpreter<'_>) -> Result<Outcome, ParseError> {
    let body = extract_program(source)?;
    tracing::debug!(lines = body.len(), "running program");

    let outcome = match interpreter.execute_block(&body) {
        ControlFlow::Continue(()) => Outcome::Completed,
        ControlFlow::Break(stop) => Outcome::Stopped { line: stop.line },
    };

    tracing::debug!(?outcome, "program finished");

    Ok(outcome)
}
