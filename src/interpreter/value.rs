/// Numeric values.
///
/// Defines `Number`, the integer-or-real payload of `Value::Number`, together
/// with its equality, ordering and display rules.
pub mod number;
/// The variable namespace.
///
/// Defines `Environment`, the single mutable mapping from names to values
/// that every block, loop iteration and function call of a run shares.
pub mod environment;

pub mod core;
