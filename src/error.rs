/// Parsing errors.
///
/// Defines all error types that can occur while locating the entry point,
/// lexing, or parsing expression text. Parse errors include a missing entry
/// point, unexpected tokens, unterminated string literals, and any other issue
/// detected before evaluation.
pub mod parse_error;
/// Runtime errors.
///
/// Contains all error types that can be raised while a statement executes.
/// Runtime errors include malformed statements, unknown names, type
/// mismatches, division by zero, and failed console I/O. All of them are
/// local to one statement: they are reported and execution moves on.
pub mod runtime_error;

pub use parse_error::ParseError;
pub use runtime_error::RuntimeError;
