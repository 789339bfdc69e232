use std::rc::Rc;

use crate::error::RuntimeError;

/// One trimmed line of program text together with its line number in the
/// original source.
///
/// Blocks are built from these so that every diagnostic can point back to the
/// line the user wrote, even when the line is replayed later from a callable
/// block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine {
    /// The line's text with surrounding whitespace removed.
    pub text: String,
    /// The 1-based line number in the program source.
    pub line: usize,
}

impl SourceLine {
    /// Creates a source line, trimming the text.
    ///
    /// # Example
    /// ```
    /// use relief::ast::SourceLine;
    ///
    /// let line = SourceLine::new("   out(1)  ", 4);
    /// assert_eq!(line.text, "out(1)");
    /// assert_eq!(line.line, 4);
    /// ```
    #[must_use]
    pub fn new(text: &str, line: usize) -> Self {
        Self { text: text.trim().to_string(),
               line }
    }

    /// Returns `true` if the line holds no statement text.
    #[must_use]
    pub const fn is_blank(&self) -> bool {
        self.text.is_empty()
    }
}

/// An ordered sequence of raw statement lines captured between delimiters.
pub type Block = Vec<SourceLine>;

/// The captured lines of a `defy` definition, shared by every invocation.
pub type SharedBlock = Rc<[SourceLine]>;

/// Represents a literal value in an expression.
#[derive(Debug, Clone, PartialEq)]
pub enum LiteralValue {
    /// A 64-bit signed integer literal.
    Integer(i64),
    /// A 64-bit floating-point literal.
    Real(f64),
    /// A boolean literal value: `true`/`True` or `false`/`False`.
    Bool(bool),
    /// A quoted string literal, stored without its quotes.
    Str(String),
}

impl From<i64> for LiteralValue {
    fn from(value: i64) -> Self {
        Self::Integer(value)
    }
}

impl From<f64> for LiteralValue {
    fn from(value: f64) -> Self {
        Self::Real(value)
    }
}

impl From<bool> for LiteralValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<&str> for LiteralValue {
    fn from(value: &str) -> Self {
        Self::Str(value.to_string())
    }
}

/// An abstract syntax tree node representing an expression.
///
/// Expressions appear on the right of assignments, inside `out(...)`, as
/// `if`/`else if` conditions and as `rep` counts.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A literal value (number, string, boolean).
    Literal {
        /// The constant value.
        value: LiteralValue,
        /// Line number in the source code.
        line:  usize,
    },
    /// Reference to a variable by name.
    Variable {
        /// Name of the variable.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A unary operation (negation, identity or `not`).
    UnaryOp {
        /// The unary operator to apply.
        op:   UnaryOperator,
        /// The operand expression.
        expr: Box<Self>,
        /// Line number in the source code.
        line: usize,
    },
    /// A binary operation (arithmetic, comparison or logical).
    BinaryOp {
        /// Left operand.
        left:  Box<Self>,
        /// The operator.
        op:    BinaryOperator,
        /// Right operand.
        right: Box<Self>,
        /// Line number in the source code.
        line:  usize,
    },
    /// Two or more comparisons written as a chain, e.g. `0 < x <= 10`.
    ///
    /// Each inner operand is evaluated once and the chain holds when every
    /// adjacent pair holds.
    ComparisonChain {
        /// The compared operands, in source order.
        operands:  Vec<Self>,
        /// The operators between consecutive operands.
        operators: Vec<BinaryOperator>,
        /// Line number in the source code.
        line:      usize,
    },
    /// The blocking input form `in("prompt")`.
    Input {
        /// The prompt written before reading.
        prompt: String,
        /// Line number in the source code.
        line:   usize,
    },
}

/// The header of a block-opening statement.
///
/// The block that follows a malformed header is still captured so that it can
/// be skipped as a whole; the error is kept here until the dispatcher reports
/// it.
pub type Header<T> = Result<T, RuntimeError>;

/// A single classified line of a block.
///
/// Statement classification only looks at the line itself. Statements that
/// open a nested block record the byte offset of their opening brace; the
/// block extractor captures the lines that follow when the statement runs.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// `stop()`: halts the whole program.
    Stop {
        /// Line number in the source code.
        line: usize,
    },
    /// `wait.<unit>(<integer>)`.
    Wait {
        /// The unit name as written.
        unit:   String,
        /// How many units to wait.
        amount: u64,
        /// Line number in the source code.
        line:   usize,
    },
    /// `<identifier> = <expression>`.
    Assignment {
        /// The variable being bound.
        name:  String,
        /// The value which is being assigned.
        value: Expr,
        /// Line number in the source code.
        line:  usize,
    },
    /// `out(<expression>)`.
    Output {
        /// The expression to print.
        expr: Expr,
        /// Line number in the source code.
        line: usize,
    },
    /// `in("<prompt>")` used as a statement.
    Input {
        /// The prompt written before reading.
        prompt: String,
        /// Line number in the source code.
        line:   usize,
    },
    /// `rep <count> { ... }`.
    Repeat {
        /// The repetition count expression.
        count: Header<Expr>,
        /// Byte offset of the opening brace in the line.
        brace: usize,
        /// Line number in the source code.
        line:  usize,
    },
    /// `if (<expression>) { ... }`.
    Conditional {
        /// The condition of the first branch.
        condition: Header<Expr>,
        /// Byte offset of the opening brace in the line.
        brace:     usize,
        /// Line number in the source code.
        line:      usize,
    },
    /// An `else` or `else if` clause that does not follow an `if` branch.
    Else {
        /// Byte offset of the opening brace, if the clause has one.
        brace: Option<usize>,
        /// Line number in the source code.
        line:  usize,
    },
    /// `defy(<name>) { ... }`.
    FunctionDefinition {
        /// The name the block is bound to.
        name:  Header<String>,
        /// Byte offset of the opening brace in the line.
        brace: usize,
        /// Line number in the source code.
        line:  usize,
    },
    /// `<name>()`.
    FunctionCall {
        /// The callee's name.
        name: String,
        /// Line number in the source code.
        line: usize,
    },
    /// A recognized statement form that could not be parsed and opens no
    /// block.
    Invalid(RuntimeError),
    /// An empty line.
    Blank,
    /// A line that matches no statement form. It is ignored.
    Unrecognized {
        /// Line number in the source code.
        line: usize,
    },
}

/// One clause of an `if` chain that follows the first branch.
#[derive(Debug, Clone, PartialEq)]
pub struct ElseClause {
    /// The `else if` condition; `None` for a plain `else`.
    pub condition: Option<Expr>,
    /// Byte offset of the opening brace in the clause text.
    pub brace:     usize,
}

/// The time units accepted by `wait.<unit>(...)`.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WaitUnit {
    /// `milsec`
    Milliseconds,
    /// `sec`
    Seconds,
    /// `min`
    Minutes,
    /// `hrs`
    Hours,
}

impl WaitUnit {
    /// Looks up a unit by the name used in source code.
    ///
    /// # Example
    /// ```
    /// use relief::ast::WaitUnit;
    ///
    /// assert_eq!(WaitUnit::from_name("sec"), Some(WaitUnit::Seconds));
    /// assert_eq!(WaitUnit::from_name("days"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "milsec" => Some(Self::Milliseconds),
            "sec" => Some(Self::Seconds),
            "min" => Some(Self::Minutes),
            "hrs" => Some(Self::Hours),
            _ => None,
        }
    }

    /// Returns the duration of `amount` units, saturating on overflow.
    #[must_use]
    pub const fn duration(self, amount: u64) -> std::time::Duration {
        use std::time::Duration;

        match self {
            Self::Milliseconds => Duration::from_millis(amount),
            Self::Seconds => Duration::from_secs(amount),
            Self::Minutes => Duration::from_secs(amount.saturating_mul(60)),
            Self::Hours => Duration::from_secs(amount.saturating_mul(3600)),
        }
    }
}

/// Represents a binary operator.
///
/// Binary operators include arithmetic, comparisons and the short-circuit
/// logical operators.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum BinaryOperator {
    /// Addition or string concatenation (`+`)
    Add,
    /// Subtraction (`-`)
    Sub,
    /// Multiplication (`*`)
    Mul,
    /// Division (`/`), always producing a real
    Div,
    /// Floor division (`//`)
    FloorDiv,
    /// Modulo (`%`)
    Mod,
    /// Exponentiation (`**`)
    Pow,
    /// Less than (`<`)
    Less,
    /// Greater than (`>`)
    Greater,
    /// Less than or equal (`<=`)
    LessEqual,
    /// Greater than or equal (`>=`)
    GreaterEqual,
    /// Equal to (`==`)
    Equal,
    /// Not equal to (`!=`)
    NotEqual,
    /// Logical and (`and`)
    And,
    /// Logical or (`or`)
    Or,
}

impl BinaryOperator {
    /// Returns `true` for the comparison operators that may be chained.
    #[must_use]
    pub const fn is_comparison(self) -> bool {
        matches!(self,
                 Self::Less
                 | Self::Greater
                 | Self::LessEqual
                 | Self::GreaterEqual
                 | Self::Equal
                 | Self::NotEqual)
    }
}

/// Represents a unary operator.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum UnaryOperator {
    /// Arithmetic negation (e.g. `-x`).
    Negate,
    /// Arithmetic identity (e.g. `+x`).
    Plus,
    /// Logical NOT (e.g. `not x`).
    Not,
}

impl std::fmt::Display for BinaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use BinaryOperator::{
            Add, And, Div, Equal, FloorDiv, Greater, GreaterEqual, Less, LessEqual, Mod, Mul,
            NotEqual, Or, Pow, Sub,
        };
        let operator = match self {
            Add => "+",
            Sub => "-",
            Mul => "*",
            Div => "/",
            FloorDiv => "//",
            Mod => "%",
            Pow => "**",
            Less => "<",
            Greater => ">",
            LessEqual => "<=",
            GreaterEqual => ">=",
            Equal => "==",
            NotEqual => "!=",
            And => "and",
            Or => "or",
        };
        write!(f, "{operator}")
    }
}

impl std::fmt::Display for UnaryOperator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let operator = match self {
            Self::Negate => "-",
            Self::Plus => "+",
            Self::Not => "not",
        };
        write!(f, "{operator}")
    }
}
