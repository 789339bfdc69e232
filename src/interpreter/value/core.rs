use crate::{
    ast::{LiteralValue, SharedBlock, SourceLine},
    error::RuntimeError,
    interpreter::{evaluator::core::EvalResult, value::number::Number},
    util::num::i64_to_count,
};

/// Represents a runtime value in the interpreter.
///
/// Every consumer handles all four variants explicitly; there is no implicit
/// conversion between them apart from truthiness.
#[derive(Debug, Clone)]
pub enum Value {
    /// A string of text.
    String(String),
    /// An integer or real number.
    Number(Number),
    /// A boolean, produced by comparisons, `not` and boolean literals.
    Boolean(bool),
    /// A block bound by `defy`, invoked with `<name>()`.
    Callable(CallableBlock),
}

/// A named block of lines captured by `defy(<name>) { ... }`.
///
/// The lines are shared, so copying the value out of the environment and
/// invoking it never clones the body.
#[derive(Debug, Clone)]
pub struct CallableBlock {
    /// The name given in the definition.
    pub name: String,
    /// The captured lines, not yet executed.
    pub body: SharedBlock,
}

impl CallableBlock {
    /// Creates a callable block from its name and captured lines.
    ///
    /// # Example
    /// ```
    /// use relief::{ast::SourceLine, interpreter::value::core::CallableBlock};
    ///
    /// let callable = CallableBlock::new("greet", vec![SourceLine::new("out(\"hi\")", 2)]);
    /// assert_eq!(callable.name, "greet");
    /// assert_eq!(callable.body.len(), 1);
    /// ```
    #[must_use]
    pub fn new(name: impl Into<String>, body: Vec<SourceLine>) -> Self {
        Self { name: name.into(),
               body: body.into() }
    }
}

impl From<LiteralValue> for Value {
    fn from(literal: LiteralValue) -> Self {
        match literal {
            LiteralValue::Integer(n) => Self::Number(Number::Integer(n)),
            LiteralValue::Real(r) => Self::Number(Number::Real(r)),
            LiteralValue::Bool(b) => Self::Boolean(b),
            LiteralValue::Str(s) => Self::String(s),
        }
    }
}

impl From<Number> for Value {
    fn from(n: Number) -> Self {
        Self::Number(n)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Number(Number::Integer(n))
    }
}

impl From<f64> for Value {
    fn from(r: f64) -> Self {
        Self::Number(Number::Real(r))
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<CallableBlock> for Value {
    fn from(callable: CallableBlock) -> Self {
        Self::Callable(callable)
    }
}

impl Value {
    /// Returns the truthiness of the value.
    ///
    /// Non-zero numbers, non-empty strings, `True` and callable blocks are
    /// truthy.
    ///
    /// # Example
    /// ```
    /// use relief::interpreter::value::core::Value;
    ///
    /// assert!(Value::from(3).is_truthy());
    /// assert!(!Value::from(0.0).is_truthy());
    /// assert!(!Value::from("").is_truthy());
    /// assert!(Value::from("no").is_truthy());
    /// assert!(!Value::from(false).is_truthy());
    /// ```
    #[must_use]
    pub fn is_truthy(&self) -> bool {
        match self {
            Self::String(s) => !s.is_empty(),
            Self::Number(n) => !n.is_zero(),
            Self::Boolean(b) => *b,
            Self::Callable(_) => true,
        }
    }

    /// Returns the name of the value's kind, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Callable(_) => "callable block",
        }
    }

    /// Converts the value to a repetition count.
    ///
    /// # Errors
    /// Returns `TypeError` unless the value is a non-negative integer.
    ///
    /// # Example
    /// ```
    /// use relief::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from(3).as_count(1).unwrap(), 3);
    /// assert!(Value::from(-1).as_count(1).is_err());
    /// assert!(Value::from(2.5).as_count(1).is_err());
    /// assert!(Value::from("3").as_count(1).is_err());
    /// ```
    pub fn as_count(&self, line: usize) -> EvalResult<u64> {
        match self {
            Self::Number(Number::Integer(n)) => i64_to_count(*n, line),
            other => {
                Err(RuntimeError::TypeError { details: format!("repetition count must be an integer, got {} '{other}'",
                                                               other.type_name()),
                                              line })
            },
        }
    }
}

impl PartialEq for Value {
    /// Values of different kinds are never equal. Callable blocks are equal
    /// only to themselves.
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Callable(a), Self::Callable(b)) => std::rc::Rc::ptr_eq(&a.body, &b.body),
            _ => false,
        }
    }
}

impl std::fmt::Display for Value {
    /// Formats the value the way `out(...)` prints it.
    ///
    /// # Example
    /// ```
    /// use relief::interpreter::value::core::Value;
    ///
    /// assert_eq!(Value::from(5).to_string(), "5");
    /// assert_eq!(Value::from(2.0).to_string(), "2.0");
    /// assert_eq!(Value::from(true).to_string(), "True");
    /// assert_eq!(Value::from("hi").to_string(), "hi");
    /// ```
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::String(s) => write!(f, "{s}"),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(true) => write!(f, "True"),
            Self::Boolean(false) => write!(f, "False"),
            Self::Callable(callable) => write!(f, "<defy {}>", callable.name),
        }
    }
}
