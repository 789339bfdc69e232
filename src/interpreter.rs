/// The evaluator module executes statements and computes expression values.
///
/// The evaluator walks each block line by line, dispatches every classified
/// statement, evaluates expressions against the shared environment, and
/// propagates the `stop()` signal. It is the core execution engine of the
/// interpreter.
///
/// # Responsibilities
/// - Executes statements and nested blocks against one environment.
/// - Evaluates expression trees, performing all supported operations.
/// - Reports runtime errors such as division by zero or undefined names
///   without ending the run.
pub mod evaluator;
/// The lexer module tokenizes expression text for further parsing.
///
/// The lexer reads the expression part of a statement and produces a stream
/// of tokens: numbers, strings, identifiers, keywords and operators.
///
/// # Responsibilities
/// - Converts expression text into tokens tagged with their source line.
/// - Reports lexical errors for invalid or malformed input.
pub mod lexer;
/// The parser module turns program text into structure.
///
/// It locates the entry-point block, captures nested blocks, classifies each
/// line as a statement and parses the expressions statements contain.
///
/// # Responsibilities
/// - Extracts blocks from raw lines.
/// - Recognizes statement forms in priority order.
/// - Builds expression trees with conventional operator precedence.
pub mod parser;
/// The value module defines the runtime data types for evaluation.
///
/// This module declares the values a program works with (strings, numbers,
/// booleans and callable blocks) and the environment that binds them to
/// names.
///
/// # Responsibilities
/// - Defines the `Value` enum and its display and truthiness rules.
/// - Defines integer and real numbers and how they compare.
/// - Holds the single, shared variable environment.
pub mod value;
