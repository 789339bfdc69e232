/// Core parsing entry points.
///
/// Defines the parse result type and the top-level expression parser that
/// turns one line's expression text into an [`Expr`](crate::ast::Expr).
pub mod core;

/// Binary operator parsing.
///
/// Implements the precedence levels from `or` down to multiplication,
/// including comparison chains.
pub mod binary;

/// Unary, power and primary expression parsing.
///
/// Handles `not`, prefix `-`/`+`, right-associative `**`, literals,
/// identifiers, groupings and the `in("prompt")` form.
pub mod unary;

/// Block extraction.
///
/// Locates the `when project start { ... }` entry point and captures the
/// nested blocks that follow block-opening statements.
pub mod block;

/// Statement classification.
///
/// Recognizes which statement form a single line holds, in the fixed
/// priority order of the language.
pub mod statement;

/// Text scanning helpers shared by the block extractor and the statement
/// classifier.
pub mod utils;
