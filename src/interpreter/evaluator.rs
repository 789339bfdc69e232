/// Binary operator evaluation logic.
///
/// Handles arithmetic with integer/real promotion, string concatenation,
/// comparisons and the eager forms of the logical operators.
pub mod binary;

/// Unary operator evaluation logic.
///
/// Implements arithmetic negation, identity and logical NOT.
pub mod unary;

/// Core evaluation logic and interpreter state.
///
/// Contains the `Interpreter`, expression evaluation, console input and
/// diagnostic reporting, and the `Stop` signal.
pub mod core;

/// The statement dispatcher.
///
/// Classifies each line of a block and executes it, reporting non-fatal
/// errors and propagating `stop()`.
pub mod statement;

/// Block-opening statements.
///
/// Executes `rep` loops, `if`/`else if`/`else` chains, `defy` definitions and
/// calls to defined blocks.
pub mod control;
